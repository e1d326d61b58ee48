//! Derived mapping views for the external remapping engine.
//!
//! The remapping engine consumes a flat, direction-specific view rather
//! than the full three-namespace table, keeping the engine contract
//! independent of the bundle's on-disk format. The view is line-based:
//!
//! ```text
//! class <from> <to>
//! field <owner-from> <descriptor> <from> <to>
//! method <owner-from> <descriptor> <from> <to>
//! ```

use std::io::Write;
use std::path::Path;

use veneer_common::Namespace;

use crate::error::MappingError;
use crate::table::MappingTable;

/// Writes the `from` → `to` mapping view for the whole table.
pub fn write_mapping_view(
    table: &MappingTable,
    from: Namespace,
    to: Namespace,
    dest_path: &Path,
) -> Result<(), MappingError> {
    let io_err = |e: std::io::Error| MappingError::Io {
        path: dest_path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(dest_path).map_err(io_err)?;
    let mut out = std::io::BufWriter::new(file);

    for class in table.classes() {
        let owner = class.name(from);
        writeln!(out, "class {} {}", owner, class.name(to)).map_err(io_err)?;
        for field in &class.fields {
            writeln!(
                out,
                "field {} {} {} {}",
                owner,
                field.descriptor,
                field.name(from),
                field.name(to)
            )
            .map_err(io_err)?;
        }
        for method in &class.methods {
            writeln!(
                out,
                "method {} {} {} {}",
                owner,
                method.descriptor,
                method.name(from),
                method.name(to)
            )
            .map_err(io_err)?;
        }
    }

    out.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "namespaces\tofficial\tintermediate\tnamed\n\
        class\ta\tclass_1\tcore/world/World\n\
        \tfield\tI\tb\tfield_7\tage\n\
        \tmethod\t()V\tc\tmethod_3\ttick\n";

    #[test]
    fn official_to_named_view() {
        let dir = tempfile::tempdir().unwrap();
        let table = MappingTable::parse(TABLE).unwrap();
        let dest = dir.path().join("official-to-named.view");

        write_mapping_view(&table, Namespace::Official, Namespace::Named, &dest).unwrap();

        let view = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(
            view,
            "class a core/world/World\n\
             field a I b age\n\
             method a ()V c tick\n"
        );
    }

    #[test]
    fn named_to_intermediate_view_uses_named_owner() {
        let dir = tempfile::tempdir().unwrap();
        let table = MappingTable::parse(TABLE).unwrap();
        let dest = dir.path().join("named-to-intermediate.view");

        write_mapping_view(&table, Namespace::Named, Namespace::Intermediate, &dest).unwrap();

        let view = std::fs::read_to_string(&dest).unwrap();
        assert!(view.starts_with("class core/world/World class_1\n"));
        assert!(view.contains("field core/world/World I age field_7\n"));
    }

    #[test]
    fn view_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let table = MappingTable::parse(TABLE).unwrap();
        let dest = dir.path().join("views").join("v.view");
        write_mapping_view(&table, Namespace::Official, Namespace::Named, &dest).unwrap();
        assert!(dest.exists());
    }
}
