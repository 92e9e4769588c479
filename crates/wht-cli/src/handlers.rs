//! # Handlers Subcommand
//!
//! Lists the calculator handler names a setting may declare.

use clap::Args;

use wht_engine::CalculatorRegistry;

/// Arguments for the handlers subcommand.
#[derive(Args, Debug)]
pub struct HandlersArgs {
    /// Print as a JSON array instead of one name per line.
    #[arg(long)]
    pub json: bool,
}

/// Render the registered handler names.
pub fn list_handlers(registry: &CalculatorRegistry, args: &HandlersArgs) -> anyhow::Result<String> {
    let names = registry.handlers();
    if args.json {
        Ok(serde_json::to_string(&names)?)
    } else {
        Ok(names.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_handlers_plain() {
        let registry = CalculatorRegistry::with_defaults();
        let out = list_handlers(&registry, &HandlersArgs { json: false }).unwrap();
        assert_eq!(out, "rate");
    }

    #[test]
    fn test_list_handlers_json() {
        let registry = CalculatorRegistry::with_defaults();
        let out = list_handlers(&registry, &HandlersArgs { json: true }).unwrap();
        assert_eq!(out, r#"["rate"]"#);
    }

    #[test]
    fn test_list_handlers_empty_registry() {
        let out = list_handlers(&CalculatorRegistry::new(), &HandlersArgs { json: false }).unwrap();
        assert!(out.is_empty());
    }
}
