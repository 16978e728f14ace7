use super::command::RichTextCommand;

/// Something the toolbar can format: a content-editable element, an
/// in-memory document, or any other backend that keeps its own selection.
pub(crate) trait EditableSurface {
    /// Apply `command` at the current selection. Returns false when the
    /// backend refused or did not recognize it.
    fn execute(&mut self, command: &RichTextCommand) -> bool;

    /// Serialized markup of the whole surface.
    fn markup(&self) -> String;

    /// Replace the whole surface with `markup`.
    fn set_markup(&mut self, markup: &str);

    fn focus(&mut self) {}
}

/// Keeps an editable surface and the draft content in step.
///
/// The surface is the source of truth between syncs; the draft only sees
/// it after `mirror`.
#[derive(Clone, Debug, Default)]
pub(crate) struct SurfaceSync {
    seeded_revision: Option<u64>,
}

impl SurfaceSync {
    pub fn is_seeded(&self) -> bool {
        self.seeded_revision.is_some()
    }

    /// Seed the surface from fetched content once. Later calls are no-ops so
    /// a repeated fetch cannot clobber edits in progress.
    pub fn seed<S: EditableSurface>(
        &mut self,
        surface: &mut S,
        revision: u64,
        content: &str,
    ) -> bool {
        if self.is_seeded() {
            return false;
        }
        surface.set_markup(content);
        self.seeded_revision = Some(revision);
        true
    }

    /// Run one toolbar command, then hand focus back to the surface.
    pub fn dispatch<S: EditableSurface>(&self, surface: &mut S, command: &RichTextCommand) -> bool {
        let applied = surface.execute(command);
        if !applied {
            tracing::debug!(?command, "command not applied");
        }
        surface.focus();
        applied
    }

    /// Copy the surface markup into `content`. Returns true when it changed.
    pub fn mirror<S: EditableSurface>(&self, surface: &S, content: &mut String) -> bool {
        let markup = surface.markup();
        if *content == markup {
            false
        } else {
            *content = markup;
            true
        }
    }
}
