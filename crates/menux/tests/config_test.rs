//! Tests for [`menux::MenuConfig`] loading from the environment.

use std::env;

use menux::{KeyboardMode, MenuConfig, MenuRegistry, TriggerMatch};
use serial_test::serial;

fn clear_env() {
    env::remove_var("MENU_DEFAULT_MODE");
    env::remove_var("MENU_TRIGGER_MATCH");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();

    let config = MenuConfig::from_env().unwrap();

    assert_eq!(config.default_mode, KeyboardMode::ReplyKeyboard);
    assert_eq!(config.trigger_match, TriggerMatch::Exact);
    assert_eq!(config, MenuConfig::default());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("MENU_DEFAULT_MODE", "inline");
    env::set_var("MENU_TRIGGER_MATCH", "case_insensitive");

    let config = MenuConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.default_mode, KeyboardMode::InlineKeyboard);
    assert_eq!(config.trigger_match, TriggerMatch::CaseInsensitive);

    let mut registry = MenuRegistry::new();
    config.apply(&mut registry);
    let id = registry.create("Main", None).unwrap();
    assert_eq!(registry.menu(id).unwrap().mode(), KeyboardMode::InlineKeyboard);
}

#[test]
#[serial]
fn test_load_config_rejects_invalid_values() {
    clear_env();
    env::set_var("MENU_DEFAULT_MODE", "sideways");

    let result = MenuConfig::from_env();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("sideways"));
}
