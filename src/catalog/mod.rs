//! Routing template catalog.
//!
//! Holds the set of routing templates and answers "which routes fit this
//! order?". It is the only stateful part of the engine.
//!
//! # Concurrency
//!
//! Readers take an [`Arc`] snapshot of the template list and work on it
//! without holding any lock. Writers are serialized by the catalog's
//! lock, build a modified copy of the list, validate it and publish it as
//! the new snapshot. A failed write publishes nothing, so readers never see
//! a half-updated catalog.

mod builtin;

pub use builtin::builtin_templates;

use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::error::{RoutingError, RoutingResult};
use crate::models::{OrderContext, RoutingTemplate};
use crate::validation::ensure_valid;

/// Validated, concurrently readable set of routing templates.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    templates: RwLock<Arc<Vec<RoutingTemplate>>>,
}

impl TemplateCatalog {
    /// Creates a catalog from an initial template set.
    ///
    /// Every template is validated and IDs must be unique. Any failure
    /// rejects the whole set.
    pub fn new(initial: Vec<RoutingTemplate>) -> RoutingResult<Self> {
        for (i, template) in initial.iter().enumerate() {
            ensure_valid(template)?;
            if initial[..i].iter().any(|t| t.id == template.id) {
                return Err(RoutingError::DuplicateTemplate {
                    id: template.id.clone(),
                });
            }
        }
        info!(count = initial.len(), "template catalog initialised");
        Ok(Self {
            templates: RwLock::new(Arc::new(initial)),
        })
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the standard apparel routes.
    pub fn with_builtin_templates() -> RoutingResult<Self> {
        Self::new(builtin_templates())
    }

    /// Current template set. The snapshot never changes after it is taken.
    pub fn snapshot(&self) -> Arc<Vec<RoutingTemplate>> {
        let guard = self.templates.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// All templates, in insertion order.
    pub fn list(&self) -> Vec<RoutingTemplate> {
        self.snapshot().to_vec()
    }

    /// Looks up a template by ID.
    pub fn get(&self, id: &str) -> Option<RoutingTemplate> {
        self.snapshot().iter().find(|t| t.id == id).cloned()
    }

    /// Whether a template with this ID is present.
    pub fn contains(&self, id: &str) -> bool {
        self.snapshot().iter().any(|t| t.id == id)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Templates matching the order's method, product type and quantity.
    ///
    /// No match is not an error: the result is simply empty.
    pub fn templates_for(&self, context: &OrderContext) -> Vec<RoutingTemplate> {
        let matches: Vec<RoutingTemplate> = self
            .snapshot()
            .iter()
            .filter(|t| {
                t.method == context.method
                    && t.applies_to(&context.product_type)
                    && t.admits_quantity(context.quantity)
            })
            .cloned()
            .collect();
        debug!(
            method = %context.method,
            product_type = %context.product_type,
            quantity = context.quantity,
            matches = matches.len(),
            "catalog lookup"
        );
        matches
    }

    /// Adds a new template.
    ///
    /// # Errors
    /// [`RoutingError::Validation`] if the template is malformed,
    /// [`RoutingError::DuplicateTemplate`] if the ID is taken.
    pub fn add(&self, template: RoutingTemplate) -> RoutingResult<()> {
        self.write(|templates| {
            ensure_valid(&template)?;
            if templates.iter().any(|t| t.id == template.id) {
                return Err(RoutingError::DuplicateTemplate {
                    id: template.id.clone(),
                });
            }
            info!(template_id = %template.id, steps = template.step_count(), "template added");
            templates.push(template);
            Ok(())
        })
    }

    /// Replaces the template with the same ID.
    ///
    /// # Errors
    /// [`RoutingError::Validation`] if the new version is malformed,
    /// [`RoutingError::TemplateNotFound`] if no template has that ID.
    pub fn update(&self, template: RoutingTemplate) -> RoutingResult<()> {
        self.write(|templates| {
            ensure_valid(&template)?;
            let slot = templates
                .iter_mut()
                .find(|t| t.id == template.id)
                .ok_or_else(|| RoutingError::TemplateNotFound {
                    id: template.id.clone(),
                })?;
            info!(template_id = %template.id, steps = template.step_count(), "template updated");
            *slot = template;
            Ok(())
        })
    }

    /// Removes a template and returns it.
    pub fn remove(&self, id: &str) -> RoutingResult<RoutingTemplate> {
        self.write(|templates| {
            let index = templates
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| RoutingError::TemplateNotFound { id: id.to_string() })?;
            info!(template_id = %id, "template removed");
            Ok(templates.remove(index))
        })
    }

    /// Runs `mutate` on a copy of the current set and publishes the copy
    /// only if it succeeds.
    fn write<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<RoutingTemplate>) -> RoutingResult<T>,
    ) -> RoutingResult<T> {
        let mut guard = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.to_vec();
        match mutate(&mut next) {
            Ok(value) => {
                *guard = Arc::new(next);
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "catalog write rejected");
                Err(err)
            }
        }
    }
}
