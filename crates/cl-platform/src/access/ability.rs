//! Capability Rules and the Ability Evaluator
//!
//! An `Ability` is an ordered list of allow/deny rules derived once per
//! request from the principal (see `policy`). Evaluation is last-match-wins:
//! a broad allow can be narrowed by a deny appended after it, which is how
//! exceptions are expressed. When nothing matches, the answer is deny.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Actions a principal can attempt on a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    /// Matches any requested action when it appears in a rule.
    Manage,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// Attribute value as seen through the structural record view.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Structural view over a record, used by rule conditions.
///
/// Implementors expose the attributes that policy conditions may reference
/// (ownership, archival flags, ...). Sensitive fields such as password hashes
/// must not be exposed here.
pub trait Subject {
    fn subject_type(&self) -> &str;
    fn attr(&self, field: &str) -> Option<FieldValue>;
}

/// Tagged predicate tree evaluated against a `Subject`.
///
/// A condition referencing an attribute the record does not expose fails
/// closed: the rule simply does not match.
#[derive(Debug, Clone)]
pub enum Condition {
    Eq { field: String, value: FieldValue },
    Ne { field: String, value: FieldValue },
    In { field: String, values: Vec<FieldValue> },
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Eq { field: field.into(), value: value.into() }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Ne { field: field.into(), value: value.into() }
    }

    pub fn is_in(field: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self::In { field: field.into(), values }
    }

    pub fn matches(&self, subject: &dyn Subject) -> bool {
        match self {
            Condition::Eq { field, value } => {
                subject.attr(field).map(|v| v == *value).unwrap_or(false)
            }
            Condition::Ne { field, value } => {
                subject.attr(field).map(|v| v != *value).unwrap_or(false)
            }
            Condition::In { field, values } => subject
                .attr(field)
                .map(|v| values.contains(&v))
                .unwrap_or(false),
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(subject)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.matches(subject)),
        }
    }
}

/// A single allow/deny statement scoped to an action and subject type.
#[derive(Debug, Clone)]
pub struct CapabilityRule {
    pub effect: Effect,
    pub action: Action,
    pub subject_type: String,
    pub condition: Option<Condition>,
    /// Fields the caller may not read/write under this rule, when present.
    pub restricted_fields: Option<HashSet<String>>,
}

impl CapabilityRule {
    pub fn allow(action: Action, subject_type: impl Into<String>) -> Self {
        Self {
            effect: Effect::Allow,
            action,
            subject_type: subject_type.into(),
            condition: None,
            restricted_fields: None,
        }
    }

    pub fn deny(action: Action, subject_type: impl Into<String>) -> Self {
        Self {
            effect: Effect::Deny,
            action,
            subject_type: subject_type.into(),
            condition: None,
            restricted_fields: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn restrict_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.restricted_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    fn action_matches(&self, requested: Action) -> bool {
        self.action == requested || self.action == Action::Manage
    }
}

/// What a rule is being evaluated against: a bare subject type (create path,
/// no record exists yet) or a loaded instance.
#[derive(Clone, Copy)]
pub enum SubjectRef<'a> {
    Type(&'a str),
    Instance(&'a dyn Subject),
}

impl<'a> SubjectRef<'a> {
    pub fn type_name(&self) -> &str {
        match self {
            SubjectRef::Type(name) => name,
            SubjectRef::Instance(subject) => subject.subject_type(),
        }
    }
}

/// Ordered rule list for one principal. Immutable for the request lifetime.
#[derive(Debug, Clone, Default)]
pub struct Ability {
    rules: Vec<CapabilityRule>,
}

impl Ability {
    pub fn new(rules: Vec<CapabilityRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CapabilityRule] {
        &self.rules
    }

    /// Decide whether `action` is permitted on `subject`.
    ///
    /// Rules are scanned in order and the last matching rule wins. Against a
    /// bare type, rules carrying an instance condition are skipped since
    /// there is no record to evaluate them on.
    pub fn can(&self, action: Action, subject: SubjectRef<'_>) -> bool {
        self.winning_rule(action, subject)
            .map(|rule| rule.effect == Effect::Allow)
            .unwrap_or(false)
    }

    /// Field restrictions attached to the rule that decided the outcome.
    pub fn restricted_fields(&self, action: Action, subject: SubjectRef<'_>) -> Option<&HashSet<String>> {
        self.winning_rule(action, subject)
            .and_then(|rule| rule.restricted_fields.as_ref())
    }

    fn winning_rule(&self, action: Action, subject: SubjectRef<'_>) -> Option<&CapabilityRule> {
        let type_name = subject.type_name();
        let mut winner = None;
        for rule in &self.rules {
            if !rule.action_matches(action) || rule.subject_type != type_name {
                continue;
            }
            match (&rule.condition, subject) {
                (None, _) => winner = Some(rule),
                // No instance to evaluate the condition on: skip the rule.
                (Some(_), SubjectRef::Type(_)) => {}
                (Some(condition), SubjectRef::Instance(instance)) => {
                    if condition.matches(instance) {
                        winner = Some(rule);
                    }
                }
            }
        }
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestDoc {
        archived: bool,
        created_by: String,
    }

    impl Subject for TestDoc {
        fn subject_type(&self) -> &str {
            "School"
        }

        fn attr(&self, field: &str) -> Option<FieldValue> {
            match field {
                "archived" => Some(FieldValue::Bool(self.archived)),
                "createdBy" => Some(FieldValue::Str(self.created_by.clone())),
                _ => None,
            }
        }
    }

    fn doc(archived: bool) -> TestDoc {
        TestDoc { archived, created_by: "u1".to_string() }
    }

    #[test]
    fn default_is_deny() {
        let ability = Ability::default();
        assert!(!ability.can(Action::Read, SubjectRef::Type("School")));
    }

    #[test]
    fn last_matching_rule_wins() {
        let allow_only = Ability::new(vec![CapabilityRule::allow(Action::Update, "School")]);
        let record = doc(true);
        assert!(allow_only.can(Action::Update, SubjectRef::Instance(&record)));

        let narrowed = Ability::new(vec![
            CapabilityRule::allow(Action::Update, "School"),
            CapabilityRule::deny(Action::Update, "School")
                .when(Condition::eq("archived", true)),
        ]);
        assert!(!narrowed.can(Action::Update, SubjectRef::Instance(&record)));

        let live = doc(false);
        assert!(narrowed.can(Action::Update, SubjectRef::Instance(&live)));
    }

    #[test]
    fn manage_matches_any_action() {
        let ability = Ability::new(vec![CapabilityRule::allow(Action::Manage, "School")]);
        let record = doc(false);
        assert!(ability.can(Action::Read, SubjectRef::Instance(&record)));
        assert!(ability.can(Action::Delete, SubjectRef::Instance(&record)));
        assert!(ability.can(Action::Manage, SubjectRef::Type("School")));
    }

    #[test]
    fn requesting_manage_does_not_match_narrow_rules() {
        let ability = Ability::new(vec![CapabilityRule::allow(Action::Read, "School")]);
        assert!(!ability.can(Action::Manage, SubjectRef::Type("School")));
    }

    #[test]
    fn conditional_rules_are_skipped_for_bare_types() {
        let ability = Ability::new(vec![
            CapabilityRule::allow(Action::Update, "School")
                .when(Condition::eq("createdBy", "u1")),
        ]);
        // Only the ownership-conditioned allow exists, so the bare type gets
        // nothing.
        assert!(!ability.can(Action::Update, SubjectRef::Type("School")));

        let record = doc(false);
        assert!(ability.can(Action::Update, SubjectRef::Instance(&record)));
    }

    #[test]
    fn subject_type_must_match() {
        let ability = Ability::new(vec![CapabilityRule::allow(Action::Read, "School")]);
        assert!(!ability.can(Action::Read, SubjectRef::Type("User")));
    }

    #[test]
    fn missing_attribute_fails_closed() {
        let ability = Ability::new(vec![
            CapabilityRule::allow(Action::Read, "School")
                .when(Condition::eq("owner", "u1")),
        ]);
        let record = doc(false);
        assert!(!ability.can(Action::Read, SubjectRef::Instance(&record)));
    }

    #[test]
    fn condition_tree_combinators() {
        let record = doc(false);
        let all = Condition::All(vec![
            Condition::eq("archived", false),
            Condition::eq("createdBy", "u1"),
        ]);
        assert!(all.matches(&record));

        let any = Condition::Any(vec![
            Condition::eq("archived", true),
            Condition::eq("createdBy", "u1"),
        ]);
        assert!(any.matches(&record));

        let ne = Condition::ne("createdBy", "u2");
        assert!(ne.matches(&record));

        let within = Condition::is_in("createdBy", vec!["u1".into(), "u2".into()]);
        assert!(within.matches(&record));
    }

    #[test]
    fn restricted_fields_come_from_winning_rule() {
        let ability = Ability::new(vec![
            CapabilityRule::allow(Action::Read, "User").restrict_fields(["email", "mobile"]),
        ]);
        let fields = ability
            .restricted_fields(Action::Read, SubjectRef::Type("User"))
            .expect("winning rule carries restrictions");
        assert!(fields.contains("email"));
        assert!(fields.contains("mobile"));
    }
}
