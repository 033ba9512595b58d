use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use tariffwatch_core::{SkuId, SupplierId};

use crate::supplier::Supplier;

/// Which suppliers are eligible alternatives for which SKU.
///
/// A missing key means the SKU has no alternatives. Values keep fixture order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuSupplierMapping {
    inner: HashMap<SkuId, Vec<SupplierId>>,
}

impl SkuSupplierMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sku: SkuId, suppliers: Vec<SupplierId>) {
        self.inner.insert(sku, suppliers);
    }

    /// Eligible supplier ids for `sku`; empty when the SKU has no entry.
    pub fn suppliers_for(&self, sku: &SkuId) -> &[SupplierId] {
        self.inner.get(sku).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, sku: &SkuId) -> bool {
        self.inner.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkuId, &[SupplierId])> {
        self.inner.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// `(sku, supplier)` pairs whose supplier id is not in `suppliers`,
    /// sorted for stable reporting.
    pub fn dangling_references(&self, suppliers: &[Supplier]) -> Vec<(SkuId, SupplierId)> {
        let known: HashSet<&SupplierId> = suppliers.iter().map(|s| &s.id).collect();
        let mut dangling: Vec<(SkuId, SupplierId)> = self
            .inner
            .iter()
            .flat_map(|(sku, ids)| {
                ids.iter()
                    .filter(|id| !known.contains(id))
                    .map(move |id| (sku.clone(), id.clone()))
            })
            .collect();
        dangling.sort();
        dangling
    }
}

impl FromIterator<(SkuId, Vec<SupplierId>)> for SkuSupplierMapping {
    fn from_iter<I: IntoIterator<Item = (SkuId, Vec<SupplierId>)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
