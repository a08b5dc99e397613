//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_configuration_display() {
    let error = CoreError::Configuration("missing LEDGER_CURRENCY".to_string());
    assert_eq!(error.to_string(), "Configuration error: missing LEDGER_CURRENCY");
}

#[test]
fn test_port_error_internal_has_no_source() {
    let error = PortError::internal("group store lock poisoned");
    assert!(std::error::Error::source(&error).is_none());
}
