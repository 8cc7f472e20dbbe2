//! Type registry listings.

use std::io::Write;

use comfy_table::Table;
use dbframe_core::{TypeRegistry, TypeRule};

/// Write every registered rule, exact names first, as a table.
pub fn write_type_rules<W: Write>(registry: &TypeRegistry, writer: &mut W) -> std::io::Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Pattern", "Scan", "Field type"]);

    for rule in registry.rules().filter(|r| r.pattern().is_none()) {
        table.add_row(rule_row(rule));
    }
    for rule in registry.pattern_rules() {
        table.add_row(rule_row(rule));
    }

    writeln!(writer, "{table}")
}

fn rule_row(rule: &TypeRule) -> Vec<String> {
    let scan = rule.scan_type();
    vec![
        rule.name().to_string(),
        rule.pattern().map(|p| p.as_str().to_string()).unwrap_or_default(),
        format!("{} {}", scan.shape.name(), scan.native),
        rule.field_type().to_string(),
    ]
}

/// Write the rule a wire type string resolves to.
///
/// Returns whether the type resolved.
pub fn write_resolution<W: Write>(
    registry: &TypeRegistry,
    type_name: &str,
    writer: &mut W,
) -> std::io::Result<bool> {
    match registry.resolve(type_name) {
        Some(rule) => {
            let how = if registry.get(type_name).is_some() {
                "exact"
            } else {
                "pattern"
            };
            writeln!(
                writer,
                "{type_name} -> {} ({how}, {})",
                rule.name(),
                rule.field_type()
            )?;
            Ok(true)
        }
        None => {
            writeln!(writer, "{type_name} -> unresolved (decoded as raw text)")?;
            Ok(false)
        }
    }
}
