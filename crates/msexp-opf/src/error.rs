use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Validation failure while building a read-only catalog from host data.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate operator name `{0}`")]
    DuplicateOperator(SmolStr),
    #[error("Operator `{name}` has min {min} greater than max {max}")]
    InvertedArity { name: SmolStr, min: usize, max: usize },
    #[error("Operator `{0}` has an empty name")]
    EmptyOperatorName(u32),
    #[error("Duplicate container name `{0}`")]
    DuplicateContainer(SmolStr),
}

impl Diagnostic for CatalogError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            CatalogError::DuplicateOperator(_) => "CatalogError::DuplicateOperator",
            CatalogError::InvertedArity { .. } => "CatalogError::InvertedArity",
            CatalogError::EmptyOperatorName(_) => "CatalogError::EmptyOperatorName",
            CatalogError::DuplicateContainer(_) => "CatalogError::DuplicateContainer",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(
            "catalog data comes from mission tables; fix the source table and rebuild",
        ))
    }
}
