//! Capabilities injected into a template
//!
//! Everything the template needs from its surroundings: id generation, the
//! node factory, the schema consistency hook, and configuration.

use crate::config::TemplateConfig;
use crate::core::{IdGenerator, UuidGenerator};
use crate::tree::{CatalogueNodeFactory, NodeFactory};
use crate::variables::{NoSchemaCheck, SchemaVariableCheck};

pub struct TemplateContext {
    pub ids: Box<dyn IdGenerator>,
    pub factory: Box<dyn NodeFactory>,
    pub schema_check: Box<dyn SchemaVariableCheck>,
    pub config: TemplateConfig,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self {
            ids: Box::new(UuidGenerator),
            factory: Box::new(CatalogueNodeFactory::default()),
            schema_check: Box::new(NoSchemaCheck),
            config: TemplateConfig::default(),
        }
    }
}

impl TemplateContext {
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_factory(mut self, factory: impl NodeFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_schema_check(mut self, check: impl SchemaVariableCheck + 'static) -> Self {
        self.schema_check = Box::new(check);
        self
    }

    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }
}
