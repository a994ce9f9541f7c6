use uuid::Uuid;

/// Records addressable by the id assigned when they entered the ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;

    fn has_id(&self, id: Uuid) -> bool {
        self.id() == id
    }
}

/// Short human-readable summary, used in log fields.
pub trait Displayable {
    fn display_label(&self) -> String;
}
