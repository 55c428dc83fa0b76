//! Descriptor table loading: embedded built-in tables, strings and files.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::descriptor::EndpointDescriptor;
use super::error::DescriptorError;

/// Built-in resource tables, embedded at compile time.
const BUILTIN_TABLES: &[(&str, &str)] = &[
    ("customers", include_str!("tables/customers.yaml")),
    ("transactions", include_str!("tables/transactions.yaml")),
    ("subaccounts", include_str!("tables/subaccounts.yaml")),
    ("plans", include_str!("tables/plans.yaml")),
    ("pages", include_str!("tables/pages.yaml")),
    ("products", include_str!("tables/products.yaml")),
    ("refunds", include_str!("tables/refunds.yaml")),
    ("charges", include_str!("tables/charges.yaml")),
    ("invoices", include_str!("tables/invoices.yaml")),
    ("transfers", include_str!("tables/transfers.yaml")),
    ("verifications", include_str!("tables/verifications.yaml")),
    ("miscellaneous", include_str!("tables/miscellaneous.yaml")),
    ("settlements", include_str!("tables/settlements.yaml")),
    ("subscriptions", include_str!("tables/subscriptions.yaml")),
    ("transfer_recipients", include_str!("tables/transfer_recipients.yaml")),
    ("control_panel", include_str!("tables/control_panel.yaml")),
];

static BUILTIN: Lazy<Result<Arc<EndpointTable>, String>> = Lazy::new(|| {
    let mut table = EndpointTable::new();
    for (resource, source) in BUILTIN_TABLES {
        let part = EndpointTable::from_yaml_str(source)
            .map_err(|e| format!("tables/{}.yaml: {}", resource, e))?;
        table
            .merge(part)
            .map_err(|e| format!("tables/{}.yaml: {}", resource, e))?;
    }
    Ok(Arc::new(table))
});

/// Mapping from operation name to its descriptor.
///
/// Every descriptor is validated on insertion, so a table that exists is
/// internally consistent.
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    entries: BTreeMap<String, Arc<EndpointDescriptor>>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The combined table of every built-in resource.
    pub fn builtin() -> Result<Arc<EndpointTable>, DescriptorError> {
        (*BUILTIN).as_ref().map(Arc::clone).map_err(|reason| {
            DescriptorError::LoadError {
                path: "builtin".to_string(),
                reason: reason.clone(),
                hint: None,
            }
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, DescriptorError> {
        let raw: BTreeMap<String, EndpointDescriptor> =
            serde_yaml::from_str(content).map_err(|e| DescriptorError::YamlError(e.to_string()))?;
        Self::from_entries(raw)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DescriptorError> {
        let raw: BTreeMap<String, EndpointDescriptor> =
            serde_json::from_str(content).map_err(|e| DescriptorError::JsonError(e.to_string()))?;
        Self::from_entries(raw)
    }

    /// Load a table from a `.json`, `.yaml` or `.yml` file.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DescriptorError::LoadError {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
                hint: Some("Check if the file exists and you have read permissions.".to_string()),
            })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let table = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            operations = table.len(),
            "loaded endpoint descriptor table"
        );
        Ok(table)
    }

    fn from_entries(raw: BTreeMap<String, EndpointDescriptor>) -> Result<Self, DescriptorError> {
        let mut table = Self::new();
        for (name, descriptor) in raw {
            table.insert(name, descriptor)?;
        }
        Ok(table)
    }

    /// Validate and add one descriptor. Names must be unique.
    pub fn insert(
        &mut self,
        operation: impl Into<String>,
        descriptor: EndpointDescriptor,
    ) -> Result<(), DescriptorError> {
        let operation = operation.into();
        descriptor.validate(&operation)?;
        if self.entries.contains_key(&operation) {
            return Err(DescriptorError::Duplicate { operation });
        }
        self.entries.insert(operation, Arc::new(descriptor));
        Ok(())
    }

    /// Fold another table into this one, rejecting name collisions.
    pub fn merge(&mut self, other: EndpointTable) -> Result<(), DescriptorError> {
        if let Some(dup) = other.entries.keys().find(|k| self.entries.contains_key(*k)) {
            return Err(DescriptorError::Duplicate {
                operation: dup.clone(),
            });
        }
        self.entries.extend(other.entries);
        Ok(())
    }

    pub fn get(&self, operation: &str) -> Option<&Arc<EndpointDescriptor>> {
        self.entries.get(operation)
    }

    pub fn resolve(&self, operation: &str) -> Result<&Arc<EndpointDescriptor>, DescriptorError> {
        self.entries
            .get(operation)
            .ok_or_else(|| DescriptorError::NotFound {
                operation: operation.to_string(),
                hint: None,
            })
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    /// Operation names in sorted order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<EndpointDescriptor>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
