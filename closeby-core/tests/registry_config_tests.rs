// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for registry::config
//!
//! Environment overrides. Kept in one test so the variables are never
//! touched from two threads at once.

use std::env;
use std::time::Duration;

use closeby_core::registry::{
    RegistryConfig, DEFAULT_REGISTRY_URL, REGISTRY_TIMEOUT_ENV, REGISTRY_URL_ENV,
};

fn clear() {
    env::remove_var(REGISTRY_URL_ENV);
    env::remove_var(REGISTRY_TIMEOUT_ENV);
}

#[test]
fn test_from_env_overrides() {
    clear();
    let config = RegistryConfig::from_env();
    assert_eq!(config.base_url, DEFAULT_REGISTRY_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));

    env::set_var(REGISTRY_URL_ENV, "  http://registry.local:9000 \n");
    env::set_var(REGISTRY_TIMEOUT_ENV, " 1500 ");
    let config = RegistryConfig::from_env();
    assert_eq!(config.base_url, "http://registry.local:9000");
    assert_eq!(config.timeout, Duration::from_millis(1500));

    // Blank URL and unparsable timeout fall back to defaults.
    env::set_var(REGISTRY_URL_ENV, "   ");
    env::set_var(REGISTRY_TIMEOUT_ENV, "soon");
    let config = RegistryConfig::from_env();
    assert_eq!(config.base_url, DEFAULT_REGISTRY_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));

    clear();
}
