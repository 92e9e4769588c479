//! # Handler Registry
//!
//! Maps the handler name a setting declares to the calculator that
//! implements it. The catalog is open: host systems register their own
//! calculators next to the built-in ones.

use std::collections::BTreeMap;
use std::sync::Arc;

use wht_core::{WhtError, WithholdingSetting};

use crate::calculation::WithholdingCalculation;
use crate::calculators::RateWithholding;

/// Constructor for a calculator bound to a setting.
pub type CalculatorFactory = fn(Arc<WithholdingSetting>) -> Box<dyn WithholdingCalculation>;

/// Name-keyed calculator constructors.
#[derive(Clone, Default)]
pub struct CalculatorRegistry {
    factories: BTreeMap<String, CalculatorFactory>,
}

impl CalculatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in calculators.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RateWithholding::HANDLER, RateWithholding::boxed);
        registry
    }

    /// Register `factory` under `name`, returning the factory it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: CalculatorFactory,
    ) -> Option<CalculatorFactory> {
        self.factories.insert(name.into(), factory)
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered handler names, sorted.
    pub fn handlers(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the calculator for `setting`.
    ///
    /// The setting's default parameters are seeded into the new context.
    pub fn build(
        &self,
        setting: Arc<WithholdingSetting>,
    ) -> Result<Box<dyn WithholdingCalculation>, WhtError> {
        let factory = self
            .factories
            .get(setting.handler.as_str())
            .ok_or_else(|| WhtError::UnknownHandler(setting.handler.clone()))?;

        let defaults = setting.parameters.clone();
        let mut calculator = factory(setting);
        calculator.context_mut().set_parameters(defaults);
        Ok(calculator)
    }
}

impl std::fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorRegistry")
            .field("handlers", &self.handlers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wht_core::{Decimal, ParameterValue};

    #[test]
    fn test_defaults_include_rate() {
        let registry = CalculatorRegistry::with_defaults();
        assert!(registry.contains("rate"));
        assert_eq!(registry.handlers(), vec!["rate"]);
    }

    #[test]
    fn test_unknown_handler() {
        let registry = CalculatorRegistry::with_defaults();
        let setting = Arc::new(WithholdingSetting::new("X", "missing"));
        match registry.build(setting) {
            Err(WhtError::UnknownHandler(name)) => assert_eq!(name, "missing"),
            Err(other) => panic!("Expected UnknownHandler, got: {other:?}"),
            Ok(_) => panic!("Expected UnknownHandler, got a calculator"),
        }
    }

    #[test]
    fn test_build_seeds_setting_parameters() {
        let registry = CalculatorRegistry::with_defaults();
        let setting = WithholdingSetting::new("Goods", "rate")
            .with_parameter("rate_override", Decimal::new(2, 0));
        let calc = registry.build(Arc::new(setting)).unwrap();
        assert_eq!(
            calc.context().parameter("rate_override"),
            Some(&ParameterValue::Decimal(Decimal::new(2, 0)))
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CalculatorRegistry::new();
        assert!(registry.register("rate", RateWithholding::boxed).is_none());
        assert!(registry.register("rate", RateWithholding::boxed).is_some());
        assert_eq!(registry.handlers().len(), 1);
    }
}
