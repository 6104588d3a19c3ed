// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kiln_core::test_support::request;
use kiln_core::test_support::strategies::*;
use proptest::prelude::*;
use yare::parameterized;

fn aws() -> PackerBakeHandler {
    PackerBakeHandler::new(CloudProvider::Aws, "packer", "/etc/kiln/templates")
}

#[test]
fn key_lists_every_part_in_order() {
    let request = request(CloudProvider::Aws, "nginx curl")
        .base_ami("ami-base")
        .vm_type("hvm")
        .upgrade(true)
        .attribute("copy_to", "eu-west-1");

    let key = aws().bake_key("us-east-1", &request);

    assert_eq!(
        key.as_str(),
        "bake:aws:us-east-1:xenial:release:ami-base:hvm::false:curl,nginx:::true:aws.json:copy_to=eu-west-1"
    );
}

#[test]
fn key_ignores_package_order_and_duplicates() {
    let handler = aws();
    let a = handler.bake_key("us-east-1", &request(CloudProvider::Aws, "nginx, curl"));
    let b = handler.bake_key("us-east-1", &request(CloudProvider::Aws, "curl nginx nginx"));
    assert_eq!(a, b);
}

#[parameterized(
    region = { "us-west-2", BakeRequest::new() },
    base_os = { "us-east-1", BakeRequest::new().base_os("trusty") },
    template = { "us-east-1", BakeRequest::new().template_file_name("custom.json") },
    upgrade = { "us-east-1", BakeRequest::new().upgrade(true) },
    attribute = { "us-east-1", BakeRequest::new().attribute("k", "v") },
)]
fn key_changes_with_any_part(region: &str, request: BakeRequest) {
    let handler = aws();
    let base = handler.bake_key("us-east-1", &BakeRequest::new());
    assert_ne!(handler.bake_key(region, &request), base);
}

#[test]
fn key_does_not_depend_on_build_metadata() {
    let handler = aws();
    let plain = request(CloudProvider::Aws, "nginx");
    let tagged = plain.clone().build_number("42").commit_hash("abc123").user("ci");
    assert_eq!(handler.bake_key("us-east-1", &plain), handler.bake_key("us-east-1", &tagged));
}

#[test]
fn separators_inside_fields_cannot_forge_parts() {
    let handler = aws();
    let a = handler.bake_key("us-east-1", &BakeRequest::new().base_os("a:b"));
    let b = handler.bake_key("us-east-1", &BakeRequest::new().base_os("a").base_label("b"));
    assert_ne!(a, b);
}

#[parameterized(
    ami_name = {
        BakeRequest::new().ami_name("app:v1"),
        BakeRequest::new().ami_name("app_v1"),
    },
    attribute_value = {
        BakeRequest::new().attribute("a", "b,c=d"),
        BakeRequest::new().attribute("a", "b").attribute("c", "d"),
    },
    attribute_name = {
        BakeRequest::new().attribute("a=b", "c"),
        BakeRequest::new().attribute("a", "b=c"),
    },
)]
fn distinct_artifacts_never_share_a_key(a: BakeRequest, b: BakeRequest) {
    let handler = aws();
    assert_ne!(handler.bake_key("us-east-1", &a), handler.bake_key("us-east-1", &b));
}

#[test]
fn command_passes_variables_and_template() {
    let request = request(CloudProvider::Aws, "nginx curl").enhanced_networking(true);

    let command = aws().bake_command("us-east-1", &request);

    assert_eq!(command.program, "packer");
    assert_eq!(
        command.args,
        vec![
            "build",
            "-color=false",
            "-var",
            "provider=aws",
            "-var",
            "region=us-east-1",
            "-var",
            "base_os=xenial",
            "-var",
            "base_label=release",
            "-var",
            "package_list=curl nginx",
            "-var",
            "enhanced_networking=true",
            "/etc/kiln/templates/aws.json",
        ]
    );
}

#[test]
fn command_uses_requested_template_and_attributes() {
    let request =
        BakeRequest::new().template_file_name("base.json").attribute("copy_to", "eu-west-1");

    let command = aws().bake_command("us-east-1", &request);

    assert_eq!(command.args.last().map(String::as_str), Some("/etc/kiln/templates/base.json"));
    assert!(command.args.contains(&"copy_to=eu-west-1".to_string()));
}

#[test]
fn scraper_reads_labelled_lines() {
    let logs = "\
==> amazon-ebs: Creating AMI...
==> amazon-ebs: image: nginx-all-20261019
==> amazon-ebs: AMI: ami-0abc123
Build 'amazon-ebs' finished.
";
    let id = JobId::new();

    let bake = scrape_generic(CloudProvider::Aws, "us-east-1", &id, logs);

    assert_eq!(bake.id, id);
    assert_eq!(bake.image_name.as_deref(), Some("nginx-all-20261019"));
    assert_eq!(bake.ami.as_deref(), Some("ami-0abc123"));
    assert_eq!(
        bake.artifacts,
        vec![BakeArtifact {
            kind: "aws/image".into(),
            name: "nginx-all-20261019".into(),
            reference: "ami-0abc123".into(),
            location: Some("us-east-1".into()),
        }]
    );
}

#[test]
fn scraper_prefers_explicit_artifacts() {
    let logs = "artifact: docker.io/kiln/nginx:1\nartifact: docker.io/kiln/nginx:latest\n";
    let bake = scrape_generic(CloudProvider::Docker, "local", &JobId::new(), logs);

    let references: Vec<_> = bake.artifacts.iter().map(|a| a.reference.as_str()).collect();
    assert_eq!(references, vec!["docker.io/kiln/nginx:1", "docker.io/kiln/nginx:latest"]);
    assert!(bake.ami.is_none());
}

#[test]
fn scraper_ignores_unlabelled_output() {
    let bake = scrape_generic(CloudProvider::Gce, "us-central1", &JobId::new(), "building\nami:\n");
    assert!(bake.artifacts.is_empty());
    assert!(bake.ami.is_none());
}

#[test]
fn registry_finds_registered_providers() {
    let registry = HandlerRegistry::with_packer_defaults("packer", "templates");

    let mut expected = CloudProvider::ALL.to_vec();
    expected.sort();
    assert_eq!(registry.providers(), expected);
    assert_eq!(registry.find(CloudProvider::Gce).unwrap().provider(), CloudProvider::Gce);
}

#[test]
fn registry_rejects_unregistered_provider() {
    let mut registry = HandlerRegistry::new();
    registry.register(aws());

    let err = registry.find(CloudProvider::Azure).err().unwrap();

    assert!(matches!(err, BakeryError::UnknownProvider(ref name) if name == "azure"));
}

proptest! {
    #[test]
    fn key_is_deterministic(request in arb_request(), region in "[a-z]{2}-[a-z]{4}-[0-9]") {
        let handler = aws();
        let again = request.clone();
        prop_assert_eq!(handler.bake_key(&region, &request), handler.bake_key(&region, &again));
    }

    #[test]
    fn key_is_independent_of_package_order(packages in arb_packages()) {
        let handler = aws();
        let forward = BakeRequest::new().package_name(packages.join(" "));
        let reversed: Vec<_> = packages.iter().rev().cloned().collect();
        let backward = BakeRequest::new().package_name(reversed.join(","));
        prop_assert_eq!(
            handler.bake_key("us-east-1", &forward),
            handler.bake_key("us-east-1", &backward)
        );
    }
}
