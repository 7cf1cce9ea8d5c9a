//! # Status Catalog
//!
//! Immutable catalog of status definitions per entity family, loaded once at
//! process start and passed by reference to the components that need it.
//! Keyed by `(family, child_code)`; within one family child codes are unique
//! and at least one non-terminal definition must exist.

use super::family::EntityFamily;
use super::system_status::SystemStatus;
use crate::error::{Result, WorkflowError};
use std::collections::HashMap;

/// One entry in the status catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDefinition {
    pub family: EntityFamily,
    pub parent_code: String,
    pub child_code: String,
    pub display_name: String,
    pub sort_order: u32,
    pub is_terminal: bool,
    pub requires_approval: bool,
}

impl StatusDefinition {
    pub fn status(&self) -> SystemStatus {
        SystemStatus::new(self.parent_code.clone(), self.child_code.clone())
    }
}

/// Immutable status catalog.
#[derive(Debug, Clone)]
pub struct StatusCatalog {
    definitions: HashMap<(EntityFamily, String), StatusDefinition>,
    // child codes per family, ordered by sort_order
    ordered: HashMap<EntityFamily, Vec<String>>,
}

impl StatusCatalog {
    pub fn builder() -> StatusCatalogBuilder {
        StatusCatalogBuilder::default()
    }

    /// Look up a definition by family and child code.
    pub fn definition(&self, family: EntityFamily, child_code: &str) -> Option<&StatusDefinition> {
        self.definitions.get(&(family, child_code.to_string()))
    }

    /// All definitions for a family, sorted by `sort_order`.
    pub fn definitions(&self, family: EntityFamily) -> Vec<&StatusDefinition> {
        self.ordered
            .get(&family)
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(|c| self.definitions.get(&(family, c.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The family's initial status: the lowest-sorted non-terminal
    /// definition, assigned to every newly created entity.
    pub fn initial_status(&self, family: EntityFamily) -> Result<SystemStatus> {
        self.definitions(family)
            .into_iter()
            .find(|d| !d.is_terminal)
            .map(StatusDefinition::status)
            .ok_or_else(|| {
                WorkflowError::Configuration(format!(
                    "no non-terminal initial status for family {family}"
                ))
            })
    }

    /// Whether the given child code is terminal for the family. Unknown
    /// codes are reported as an error by the validator, not here.
    pub fn is_terminal(&self, family: EntityFamily, child_code: &str) -> bool {
        self.definition(family, child_code)
            .map(|d| d.is_terminal)
            .unwrap_or(false)
    }

    /// The canonical catalog for the procurement pipeline.
    pub fn standard() -> Self {
        let mut b = Self::builder();

        let pr = EntityFamily::PurchaseRequest;
        b.define(pr, "REQUESTED", "Requested", 1, false, true);
        b.define(pr, "RECEIVED", "Received", 2, false, false);
        b.define(pr, "VENDOR_SELECTION", "Vendor Selection", 3, false, false);
        b.define(pr, "CONTRACT_PENDING", "Contract Pending", 4, false, false);
        b.define(pr, "INSPECTION", "Inspection", 5, false, false);
        b.define(pr, "INVOICE_ISSUED", "Invoice Issued", 6, false, false);
        b.define(pr, "PAYMENT_COMPLETED", "Payment Completed", 7, true, false);
        b.define(pr, "REJECTED", "Rejected", 8, true, false);

        let bd = EntityFamily::Bidding;
        b.define(bd, "PENDING", "Pending", 1, false, false);
        b.define(bd, "ONGOING", "Ongoing", 2, false, false);
        b.define(bd, "CLOSED", "Closed", 3, true, false);
        b.define(bd, "CANCELED", "Canceled", 4, true, false);

        let bc = EntityFamily::BiddingContract;
        b.define(bc, "DRAFT", "Draft", 1, false, false);
        b.define(bc, "IN_PROGRESS", "In Progress", 2, false, false);
        b.define(bc, "CLOSED", "Closed", 3, true, false);
        b.define(bc, "CANCELED", "Canceled", 4, true, false);

        let sp = EntityFamily::Supplier;
        b.define(sp, "PENDING", "Pending Review", 1, false, true);
        b.define(sp, "APPROVED", "Approved", 2, false, false);
        b.define(sp, "SUSPENDED", "Suspended", 3, false, false);
        b.define(sp, "REJECTED", "Rejected", 4, true, false);
        b.define(sp, "BLACKLIST", "Blacklisted", 5, true, false);

        let iv = EntityFamily::Invoice;
        b.define(iv, "ISSUED", "Issued", 1, false, false);
        b.define(iv, "VERIFIED", "Verified", 2, true, false);
        b.define(iv, "REJECTED", "Rejected", 3, true, false);

        let py = EntityFamily::Payment;
        b.define(py, "PENDING", "Pending", 1, false, false);
        b.define(py, "COMPLETED", "Completed", 2, true, false);
        b.define(py, "CANCELED", "Canceled", 3, true, false);

        b.build()
            .expect("standard status catalog must be internally consistent")
    }
}

/// Builder validating catalog invariants before the catalog becomes
/// immutable.
#[derive(Debug, Default)]
pub struct StatusCatalogBuilder {
    definitions: Vec<StatusDefinition>,
    duplicate: Option<(EntityFamily, String)>,
}

impl StatusCatalogBuilder {
    pub fn define(
        &mut self,
        family: EntityFamily,
        child_code: &str,
        display_name: &str,
        sort_order: u32,
        is_terminal: bool,
        requires_approval: bool,
    ) -> &mut Self {
        if self
            .definitions
            .iter()
            .any(|d| d.family == family && d.child_code == child_code)
        {
            self.duplicate = Some((family, child_code.to_string()));
        }
        self.definitions.push(StatusDefinition {
            family,
            parent_code: family.code().to_string(),
            child_code: child_code.to_string(),
            display_name: display_name.to_string(),
            sort_order,
            is_terminal,
            requires_approval,
        });
        self
    }

    pub fn build(self) -> Result<StatusCatalog> {
        if let Some((family, code)) = self.duplicate {
            return Err(WorkflowError::Configuration(format!(
                "duplicate child code {code} in family {family}"
            )));
        }

        let mut ordered: HashMap<EntityFamily, Vec<(u32, String)>> = HashMap::new();
        let mut definitions = HashMap::new();
        for def in self.definitions {
            ordered
                .entry(def.family)
                .or_default()
                .push((def.sort_order, def.child_code.clone()));
            definitions.insert((def.family, def.child_code.clone()), def);
        }

        let ordered: HashMap<EntityFamily, Vec<String>> = ordered
            .into_iter()
            .map(|(family, mut codes)| {
                codes.sort_by_key(|(order, _)| *order);
                (family, codes.into_iter().map(|(_, c)| c).collect())
            })
            .collect();

        // every family needs a non-terminal entry to start from
        for (family, codes) in &ordered {
            let has_initial = codes
                .iter()
                .any(|c| !definitions[&(*family, c.clone())].is_terminal);
            if !has_initial {
                return Err(WorkflowError::Configuration(format!(
                    "family {family} has no non-terminal definition"
                )));
            }
        }

        Ok(StatusCatalog {
            definitions,
            ordered,
        })
    }
}
