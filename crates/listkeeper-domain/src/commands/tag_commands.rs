use super::{Command, CommandContext};
use crate::tag::TagMetadata;
use listkeeper_core::ListResult;

/// Replace the tag registry wholesale. Produced by tag synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTagRegistry {
    pub tags: Vec<TagMetadata>,
}

impl Command for UpdateTagRegistry {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        *context.tags = self.tags.clone();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update tag registry ({} tags)", self.tags.len())
    }
}
