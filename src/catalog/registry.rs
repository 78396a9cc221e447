use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::{debug, info};

use super::types::{CalculatorDescriptor, Category, CategoryGroup};
use crate::error::{CatalogError, IntegrityViolation, Result};

const BUILTIN_CALCULATORS: &str = include_str!("../../data/calculators.toml");

#[derive(Debug, Deserialize)]
struct CalculatorFile {
    #[serde(default, rename = "calculator")]
    calculators: Vec<CalculatorDescriptor>,
}

/// Immutable collection of calculator descriptors.
///
/// Built once at startup and shared by reference; there is no mutation API.
#[derive(Debug, Clone)]
pub struct Registry {
    calculators: Vec<CalculatorDescriptor>,
    by_id: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
}

impl Registry {
    /// Validate and index a list of descriptors.
    ///
    /// Every violation is collected before failing so a broken data file
    /// reports all of its problems at once.
    pub fn new(calculators: Vec<CalculatorDescriptor>) -> Result<Self> {
        let violations = check_integrity(&calculators);
        if !violations.is_empty() {
            return Err(CatalogError::Integrity(violations));
        }

        let by_id = calculators
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let by_path = calculators
            .iter()
            .enumerate()
            .map(|(i, c)| (c.path.clone(), i))
            .collect();

        Ok(Self {
            calculators,
            by_id,
            by_path,
        })
    }

    pub fn empty() -> Self {
        Self {
            calculators: Vec::new(),
            by_id: HashMap::new(),
            by_path: HashMap::new(),
        }
    }

    /// Parse a TOML document of `[[calculator]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CalculatorFile = toml::from_str(source)?;
        Self::new(file.calculators)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let registry = Self::from_toml_str(BUILTIN_CALCULATORS)?;
        info!(
            calculators = registry.len(),
            categories = registry.list_categories().len(),
            "Loaded built-in calculator registry"
        );
        Ok(registry)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&CalculatorDescriptor> {
        let found = self.by_id.get(id).map(|&i| &self.calculators[i]);
        if found.is_none() {
            debug!(id, "Calculator id not found");
        }
        found
    }

    pub fn find_by_path(&self, path: &str) -> Option<&CalculatorDescriptor> {
        self.by_path.get(path).map(|&i| &self.calculators[i])
    }

    /// All calculators in `category`, in registry order. Empty when none match.
    pub fn filter_by_category(&self, category: Category) -> Vec<&CalculatorDescriptor> {
        self.calculators
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn list_categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.calculators
            .iter()
            .map(|c| c.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn category_groups(&self) -> Vec<CategoryGroup<'_>> {
        self.list_categories()
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                slug: category.slug(),
                calculators: self.filter_by_category(category),
            })
            .collect()
    }

    /// Resolve a `/category/{slug}` segment back to a category present in the registry.
    pub fn find_category_by_slug(&self, slug: &str) -> Option<Category> {
        self.list_categories()
            .into_iter()
            .find(|c| c.slug() == slug)
    }

    /// Case-insensitive match against title, description and category name.
    pub fn search(&self, query: &str) -> Vec<&CalculatorDescriptor> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.calculators.iter().collect();
        }
        self.calculators
            .iter()
            .filter(|c| {
                c.title.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
                    || c.category.name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculatorDescriptor> {
        self.calculators.iter()
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

fn check_integrity(calculators: &[CalculatorDescriptor]) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();
    let mut ids = HashSet::new();
    let mut paths = HashSet::new();

    for calc in calculators {
        if calc.id.trim().is_empty() {
            violations.push(IntegrityViolation::EmptyField {
                id: calc.path.clone(),
                field: "id",
            });
        }
        if calc.title.trim().is_empty() {
            violations.push(IntegrityViolation::EmptyField {
                id: calc.id.clone(),
                field: "title",
            });
        }
        if !calc.path.starts_with('/') {
            violations.push(IntegrityViolation::RelativePath {
                id: calc.id.clone(),
                path: calc.path.clone(),
            });
        }
        if !ids.insert(calc.id.as_str()) {
            violations.push(IntegrityViolation::DuplicateId(calc.id.clone()));
        }
        if !paths.insert(calc.path.as_str()) {
            violations.push(IntegrityViolation::DuplicatePath {
                path: calc.path.clone(),
                id: calc.id.clone(),
            });
        }
    }

    violations
}
