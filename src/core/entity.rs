//! Entity traits defining the core abstraction for all persisted records

/// Base trait for all entities in the system.
///
/// Entities are identified by a store-generated integer id. An id of `0`
/// marks a record that has not been persisted yet; the repository assigns
/// the next id on first persist.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "payments", "countries")
    fn resource_name() -> &'static str;

    /// The singular entity type name (e.g., "payment", "country")
    fn entity_type() -> &'static str;

    /// Get the identifier of this entity instance
    fn id(&self) -> i64;

    /// Set the identifier, called by the repository on insert
    fn set_id(&mut self, id: i64);

    /// Check if the entity has not been persisted yet
    fn is_new(&self) -> bool {
        self.id() == 0
    }
}

/// Trait for entities that carry a human-readable name.
///
/// Named entities can be looked up by name, and may declare that name as a
/// unique column so the store rejects duplicates on flush.
pub trait Data: Entity {
    /// Get the name of this entity
    fn name(&self) -> &str;

    /// Whether the store enforces name uniqueness for this entity type
    fn unique_name() -> bool {
        false
    }
}
