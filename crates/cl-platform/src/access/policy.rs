//! Capability Policy
//!
//! Pure mapping from the (possibly absent) principal to an ordered rule
//! list. No I/O, fully deterministic, so it can be unit-tested without any
//! storage dependency. The policy is computed once per request and the
//! resulting `Ability` never mutates afterwards.

use crate::access::ability::{Ability, Action, CapabilityRule, Condition};
use crate::domain::Principal;

/// Subject types anonymous visitors may browse.
const PUBLIC_CATALOG: &[&str] = &["School", "Institute", "Subject", "CalendarEvent"];

/// Subject types a signed-in member may read.
const MEMBER_READABLE: &[&str] = &[
    "School",
    "Institute",
    "Subject",
    "CalendarEvent",
    "User",
    "Discussion",
    "Follower",
];

/// Subject types a member may create.
const MEMBER_CREATABLE: &[&str] = &[
    "School",
    "Institute",
    "Subject",
    "CalendarEvent",
    "Discussion",
    "Follower",
];

/// Subject types a member may update/delete when they own the record.
const MEMBER_OWNED: &[&str] = &[
    "School",
    "Institute",
    "Subject",
    "CalendarEvent",
    "Discussion",
];

/// Derive the rule list for one request.
pub fn abilities_for(principal: Option<&Principal>) -> Ability {
    match principal {
        None => anonymous_rules(),
        Some(p) if p.is_admin() => admin_rules(),
        Some(p) => member_rules(p),
    }
}

/// Anonymous visitors: read the public catalog, nothing else. Default deny
/// covers everything unlisted.
fn anonymous_rules() -> Ability {
    let rules = PUBLIC_CATALOG
        .iter()
        .map(|subject| CapabilityRule::allow(Action::Read, *subject))
        .collect();
    Ability::new(rules)
}

fn member_rules(principal: &Principal) -> Ability {
    let mut rules = Vec::new();

    for subject in MEMBER_READABLE {
        rules.push(CapabilityRule::allow(Action::Read, *subject));
    }

    for subject in MEMBER_CREATABLE {
        rules.push(CapabilityRule::allow(Action::Create, *subject));
    }

    // Members may change records they created.
    let owns = || Condition::eq("createdBy", principal.id.as_str());
    for subject in MEMBER_OWNED {
        rules.push(CapabilityRule::allow(Action::Update, *subject).when(owns()));
        rules.push(CapabilityRule::allow(Action::Delete, *subject).when(owns()));
    }

    // Self-service on the own user record; unfollow own edges.
    let is_self = Condition::eq("_id", principal.id.as_str());
    rules.push(CapabilityRule::allow(Action::Update, "User").when(is_self));
    rules.push(
        CapabilityRule::allow(Action::Delete, "Follower")
            .when(Condition::eq("user", principal.id.as_str())),
    );

    // Appended after the allows: archived schools are frozen for members.
    rules.push(
        CapabilityRule::deny(Action::Update, "School").when(Condition::eq("archived", true)),
    );

    Ability::new(rules)
}

fn admin_rules() -> Ability {
    let rules = MEMBER_READABLE
        .iter()
        .map(|subject| CapabilityRule::allow(Action::Manage, *subject))
        .collect();
    Ability::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ability::SubjectRef;

    #[test]
    fn anonymous_reads_public_catalog_only() {
        let ability = abilities_for(None);
        assert!(ability.can(Action::Read, SubjectRef::Type("School")));
        assert!(ability.can(Action::Read, SubjectRef::Type("Subject")));
        assert!(!ability.can(Action::Read, SubjectRef::Type("User")));
        assert!(!ability.can(Action::Update, SubjectRef::Type("School")));
        assert!(!ability.can(Action::Create, SubjectRef::Type("Discussion")));
    }

    #[test]
    fn member_can_create_and_read() {
        let principal = Principal::member("u1", "alice");
        let ability = abilities_for(Some(&principal));
        assert!(ability.can(Action::Read, SubjectRef::Type("Discussion")));
        assert!(ability.can(Action::Create, SubjectRef::Type("School")));
        // Updates are ownership-conditioned, so the bare type gets nothing.
        assert!(!ability.can(Action::Update, SubjectRef::Type("School")));
    }

    #[test]
    fn admin_manages_everything() {
        let principal = Principal::admin("a1", "root");
        let ability = abilities_for(Some(&principal));
        assert!(ability.can(Action::Delete, SubjectRef::Type("User")));
        assert!(ability.can(Action::Manage, SubjectRef::Type("School")));
    }

    #[test]
    fn policy_is_deterministic() {
        let principal = Principal::member("u1", "alice");
        let a = abilities_for(Some(&principal));
        let b = abilities_for(Some(&principal));
        assert_eq!(a.rules().len(), b.rules().len());
    }
}
