//! # CRUD Operation Handlers
//!
//! Create/update/delete/delete-all over a single [`Collection`].
//!
//! The handlers are generic over [`Entity`]; User and Event are the two
//! kinds exposed for mutation. Every handler either fully applies or leaves
//! the collection untouched.

use crate::idgen::IdGenerator;
use crate::store::{Collection, Record};
use crate::types::{
    AddEventInput, AddUserInput, DeleteAllOutput, Event, GatewayError, UpdateEventInput,
    UpdateUserInput, User,
};

// =============================================================================
// ENTITY TRAIT
// =============================================================================

/// A record kind that supports creation and partial update.
pub trait Entity: Record {
    /// Payload with every required field.
    type Create;
    /// Payload where only present fields overwrite.
    type Patch;

    /// Build a record from a fresh id and a create payload.
    fn create(id: String, input: Self::Create) -> Self;

    /// Shallow merge: fields present in `patch` overwrite, the rest are kept.
    #[must_use]
    fn merged(self, patch: Self::Patch) -> Self;
}

impl Entity for User {
    type Create = AddUserInput;
    type Patch = UpdateUserInput;

    fn create(id: String, input: AddUserInput) -> Self {
        Self {
            id,
            username: input.username,
            email: input.email,
        }
    }

    fn merged(self, patch: UpdateUserInput) -> Self {
        Self {
            id: self.id,
            username: patch.username.unwrap_or(self.username),
            email: patch.email.unwrap_or(self.email),
        }
    }
}

impl Entity for Event {
    type Create = AddEventInput;
    type Patch = UpdateEventInput;

    fn create(id: String, input: AddEventInput) -> Self {
        Self {
            id,
            title: input.title,
            desc: input.desc,
            date: input.date,
            from: input.from,
            to: input.to,
            location_id: input.location_id,
            user_id: input.user_id,
        }
    }

    fn merged(self, patch: UpdateEventInput) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or(self.title),
            desc: patch.desc.unwrap_or(self.desc),
            date: patch.date.unwrap_or(self.date),
            from: patch.from.unwrap_or(self.from),
            to: patch.to.unwrap_or(self.to),
            location_id: patch.location_id.unwrap_or(self.location_id),
            user_id: patch.user_id.unwrap_or(self.user_id),
        }
    }
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Mutation handlers shared by every [`Entity`] kind.
///
/// `stage_*` compute the outcome of a mutation without touching the
/// collection, so callers can validate the staged record before committing.
pub struct Mutations;

impl Mutations {
    /// Build `{id: generate(), ...input}` without inserting it.
    pub fn stage_add<T: Entity>(ids: &dyn IdGenerator, input: T::Create) -> T {
        T::create(ids.generate(), input)
    }

    /// Position of the record with `id` and its merged form, without writing.
    pub fn stage_update<T: Entity>(
        collection: &Collection<T>,
        id: &str,
        patch: T::Patch,
    ) -> Result<(usize, T), GatewayError> {
        let (index, current) = Self::stage_delete(collection, id)?;
        Ok((index, current.merged(patch)))
    }

    /// Position of the record with `id` and a copy of it, without removing it.
    pub fn stage_delete<T: Entity>(
        collection: &Collection<T>,
        id: &str,
    ) -> Result<(usize, T), GatewayError> {
        collection
            .find_index_by_id(id)
            .and_then(|index| Some((index, collection.as_slice().get(index)?.clone())))
            .ok_or_else(|| GatewayError::not_found(T::KIND, id))
    }

    /// Append `{id: generate(), ...input}` and return it.
    pub fn add<T: Entity>(
        collection: &mut Collection<T>,
        ids: &dyn IdGenerator,
        input: T::Create,
    ) -> T {
        let record = Self::stage_add::<T>(ids, input);
        collection.append(record.clone());
        record
    }

    /// Merge `patch` over the record with `id` and write it back in place.
    pub fn update<T: Entity>(
        collection: &mut Collection<T>,
        id: &str,
        patch: T::Patch,
    ) -> Result<T, GatewayError> {
        let (index, merged) = Self::stage_update(collection, id, patch)?;
        Self::commit_update(collection, index, merged)
    }

    /// Remove the record with `id` and return it as it was.
    pub fn delete<T: Entity>(collection: &mut Collection<T>, id: &str) -> Result<T, GatewayError> {
        let (index, current) = Self::stage_delete(collection, id)?;
        Self::commit_delete(collection, index, current.id())
    }

    /// Write a staged update back at `index`.
    pub fn commit_update<T: Entity>(
        collection: &mut Collection<T>,
        index: usize,
        merged: T,
    ) -> Result<T, GatewayError> {
        let missing = GatewayError::not_found(T::KIND, merged.id());
        collection
            .replace_at(index, merged.clone())
            .ok_or(missing)?;
        Ok(merged)
    }

    /// Remove the staged record at `index`.
    pub fn commit_delete<T: Entity>(
        collection: &mut Collection<T>,
        index: usize,
        id: &str,
    ) -> Result<T, GatewayError> {
        collection
            .remove_at(index)
            .ok_or_else(|| GatewayError::not_found(T::KIND, id))
    }

    /// Empty the collection, reporting how many records it held.
    pub fn delete_all<T: Entity>(collection: &mut Collection<T>) -> DeleteAllOutput {
        DeleteAllOutput {
            count: collection.clear(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idgen::SequentialIdGenerator;
    use crate::types::EntityKind;

    fn users() -> Collection<User> {
        Collection::from_records(vec![
            User {
                id: "u1".into(),
                username: "ada".into(),
                email: "ada@example.com".into(),
            },
            User {
                id: "u2".into(),
                username: "bob".into(),
                email: "bob@example.com".into(),
            },
        ])
    }

    fn event() -> Event {
        Event {
            id: "e1".into(),
            title: "Meetup".into(),
            desc: "Monthly".into(),
            date: Some("2024-05-01".into()),
            from: Some("18:00".into()),
            to: Some("21:00".into()),
            location_id: "l1".into(),
            user_id: "u1".into(),
        }
    }

    #[test]
    fn add_appends_with_generated_id() {
        let mut users = users();
        let ids = SequentialIdGenerator::new("new-");

        let created = Mutations::add(
            &mut users,
            &ids,
            AddUserInput {
                username: "cy".into(),
                email: "cy@example.com".into(),
            },
        );

        assert_eq!(created.id, "new-1");
        assert_eq!(users.len(), 3);
        assert_eq!(users.as_slice().last(), Some(&created));
    }

    #[test]
    fn update_merges_present_fields_only() {
        let mut users = users();
        let patch = UpdateUserInput {
            username: Some("ada2".into()),
            email: None,
        };

        let updated = Mutations::update(&mut users, "u1", patch).expect("update");

        assert_eq!(updated.username, "ada2");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(users.find_by_id("u1"), Some(&updated));
        assert_eq!(users.find_index_by_id("u1"), Some(0));
    }

    #[test]
    fn update_with_empty_string_overwrites() {
        let mut users = users();
        let patch = UpdateUserInput {
            username: None,
            email: Some(String::new()),
        };

        let updated = Mutations::update(&mut users, "u2", patch).expect("update");
        assert_eq!(updated.email, "");
    }

    #[test]
    fn update_missing_is_not_found_and_unchanged() {
        let mut users = users();
        let before = users.clone();

        let result = Mutations::update(
            &mut users,
            "missing",
            UpdateUserInput {
                username: Some("x".into()),
                email: None,
            },
        );

        assert_eq!(
            result,
            Err(GatewayError::not_found(EntityKind::User, "missing"))
        );
        assert_eq!(users, before);
    }

    #[test]
    fn event_update_clears_optional_on_null() {
        let mut events = Collection::from_records(vec![event()]);
        let patch = UpdateEventInput {
            date: Some(None),
            title: Some("Renamed".into()),
            ..UpdateEventInput::default()
        };

        let updated = Mutations::update(&mut events, "e1", patch).expect("update");

        assert_eq!(updated.date, None);
        assert_eq!(updated.from.as_deref(), Some("18:00"));
        assert_eq!(updated.title, "Renamed");
    }

    #[test]
    fn event_update_with_empty_patch_is_identity() {
        let mut events = Collection::from_records(vec![event()]);

        let updated =
            Mutations::update(&mut events, "e1", UpdateEventInput::default()).expect("update");
        assert_eq!(updated, event());
    }

    #[test]
    fn delete_returns_removed_record() {
        let mut users = users();

        let removed = Mutations::delete(&mut users, "u1").expect("delete");

        assert_eq!(removed.username, "ada");
        assert_eq!(users.len(), 1);
        assert!(users.find_by_id("u1").is_none());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut users = users();

        let result = Mutations::delete(&mut users, "nope");

        assert!(matches!(result, Err(GatewayError::NotFound { .. })));
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn delete_all_counts_then_zero() {
        let mut users = users();

        assert_eq!(Mutations::delete_all(&mut users).count, 2);
        assert_eq!(Mutations::delete_all(&mut users).count, 0);
        assert!(users.is_empty());
    }
}
