// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical deduplication key for a bake.

use serde::{Deserialize, Serialize};

/// Identifies "the same logical bake".
///
/// Two requests that normalize to equal keys converge onto one status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BakeKey(String);

impl BakeKey {
    pub const PREFIX: &'static str = "bake";

    /// Wrap an already-canonical key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Start a key with the `bake` prefix
    pub fn builder() -> KeyBuilder {
        KeyBuilder { key: String::from(Self::PREFIX) }
    }

    /// Compose `bake:part:part:...` from plain text parts
    pub fn compose<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        parts.into_iter().fold(Self::builder(), KeyBuilder::part).build()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Appends positional parts to a key.
///
/// Every part keeps its position even when empty. Reserved characters inside
/// values (`%`, `:`, `,`, `=`) are percent-encoded, so distinct inputs always
/// yield distinct keys.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    key: String,
}

impl KeyBuilder {
    const SEPARATOR: char = ':';

    pub fn part(mut self, value: impl AsRef<str>) -> Self {
        self.key.push(Self::SEPARATOR);
        escape_into(&mut self.key, value.as_ref());
        self
    }

    /// A `,`-joined list as a single part
    pub fn list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.key.push(Self::SEPARATOR);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.key.push(',');
            }
            escape_into(&mut self.key, item.as_ref());
        }
        self
    }

    /// `k=v` pairs joined by `,` as a single part
    pub fn pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.key.push(Self::SEPARATOR);
        for (i, (name, value)) in pairs.into_iter().enumerate() {
            if i > 0 {
                self.key.push(',');
            }
            escape_into(&mut self.key, name.as_ref());
            self.key.push('=');
            escape_into(&mut self.key, value.as_ref());
        }
        self
    }

    pub fn build(self) -> BakeKey {
        BakeKey(self.key)
    }
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            ',' => out.push_str("%2C"),
            '=' => out.push_str("%3D"),
            c => out.push(c),
        }
    }
}

impl std::fmt::Display for BakeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BakeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
