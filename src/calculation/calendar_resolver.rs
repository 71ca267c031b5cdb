//! Calendar cascade resolution.
//!
//! A production owns one concrete [`CalendarConfig`]. Departments and line
//! items may each carry a partial [`PhaseOverride`] per phase. Overrides are
//! stored in a flat arena keyed by `(EntityKind, id, Phase)` and resolved by an
//! explicit lookup chain: line item, then department, then production.
//!
//! ## Resolution Rules
//!
//! - An absent override, or one with `inherit_from_parent = true`, defers to
//!   the parent level verbatim
//! - A non-inheriting override replaces the parent's working dates and, when
//!   present, its hours; a missing field falls back to the parent's value
//! - The production level must be concrete; an inheriting root is a
//!   configuration error

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarConfig, Phase, PhaseConfig, PhaseOverride};

/// The kind of entity an override is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A budget department.
    Department,
    /// A single budget line item.
    LineItem,
}

/// The entity whose calendar is being resolved.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::EntityRef;
///
/// let json = r#"{ "kind": "line_item", "id": "li-7", "department_id": "camera" }"#;
/// let entity: EntityRef = serde_json::from_str(json).unwrap();
/// assert_eq!(entity, EntityRef::line_item("li-7", Some("camera")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    /// The production itself.
    Production,
    /// A department.
    Department {
        /// Department identifier.
        id: String,
    },
    /// A line item, optionally filed under a department.
    LineItem {
        /// Line item identifier.
        id: String,
        /// The department the line item belongs to.
        #[serde(default)]
        department_id: Option<String>,
    },
}

impl EntityRef {
    /// A department reference.
    pub fn department(id: impl Into<String>) -> Self {
        EntityRef::Department { id: id.into() }
    }

    /// A line item reference.
    pub fn line_item(id: impl Into<String>, department_id: Option<&str>) -> Self {
        EntityRef::LineItem {
            id: id.into(),
            department_id: department_id.map(str::to_string),
        }
    }

    /// The override levels above the production root, most specific first.
    fn chain(&self) -> Vec<(EntityKind, &str)> {
        match self {
            EntityRef::Production => Vec::new(),
            EntityRef::Department { id } => vec![(EntityKind::Department, id.as_str())],
            EntityRef::LineItem { id, department_id } => {
                let mut chain = vec![(EntityKind::LineItem, id.as_str())];
                if let Some(department_id) = department_id {
                    chain.push((EntityKind::Department, department_id.as_str()));
                }
                chain
            }
        }
    }
}

/// Arena key for one override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverrideKey {
    /// Owner kind.
    pub kind: EntityKind,
    /// Owner identifier.
    pub id: String,
    /// Phase overridden.
    pub phase: Phase,
}

/// Per-phase overrides owned by one entity.
pub type PhaseOverrides = BTreeMap<Phase, PhaseOverride>;

/// The three-level calendar configuration in its wire shape.
///
/// Departments and line items map their identifier to the phases they
/// override. Entities with no entry inherit everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeSnapshot {
    /// The production calendar.
    #[serde(default)]
    pub production: CalendarConfig,
    /// Department overrides by department id.
    #[serde(default)]
    pub departments: BTreeMap<String, PhaseOverrides>,
    /// Line item overrides by line item id.
    #[serde(default)]
    pub line_items: BTreeMap<String, PhaseOverrides>,
}

/// The calendar cascade: the production root plus an override arena.
///
/// Every cascade and every write takes a fresh [`version`](CalendarCascade::version)
/// from a process-wide counter, so no two distinct cascade states share a
/// version and callers can memoize resolutions on `(entity, phase, version)`.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::{CalendarCascade, EntityKind, EntityRef};
/// use labor_engine::models::{CalendarConfig, Phase, PhaseOverride};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut cascade = CalendarCascade::new(CalendarConfig::default());
/// cascade.set_override(
///     EntityKind::Department,
///     "camera",
///     Phase::Shoot,
///     PhaseOverride::replace(Decimal::new(12, 0), [NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()]),
/// );
///
/// let resolved = cascade
///     .resolve(&EntityRef::line_item("li-1", Some("camera")), Phase::Shoot)
///     .unwrap();
/// assert_eq!(resolved.default_hours_per_day, Decimal::new(12, 0));
/// assert_eq!(resolved.days(), 1);
/// ```
#[derive(Debug, Clone, Eq)]
pub struct CalendarCascade {
    production: CalendarConfig,
    overrides: HashMap<OverrideKey, PhaseOverride>,
    version: u64,
}

/// Source of cascade versions. Starts at 1 so a fresh memo never matches.
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

impl CalendarCascade {
    /// Creates a cascade with no department or line item overrides.
    pub fn new(production: CalendarConfig) -> Self {
        Self {
            production,
            overrides: HashMap::new(),
            version: next_version(),
        }
    }

    /// The production calendar.
    pub fn production(&self) -> &CalendarConfig {
        &self.production
    }

    /// Version stamp of this cascade's current contents, unique within the process.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of stored overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Replaces the production calendar.
    pub fn set_production(&mut self, production: CalendarConfig) {
        self.production = production;
        self.version = next_version();
    }

    /// Stores an override for one phase of an entity, replacing any previous one.
    pub fn set_override(
        &mut self,
        kind: EntityKind,
        id: impl Into<String>,
        phase: Phase,
        phase_override: PhaseOverride,
    ) {
        let key = OverrideKey {
            kind,
            id: id.into(),
            phase,
        };
        self.overrides.insert(key, phase_override);
        self.version = next_version();
    }

    /// Removes an override, returning it if one was stored.
    pub fn clear_override(
        &mut self,
        kind: EntityKind,
        id: &str,
        phase: Phase,
    ) -> Option<PhaseOverride> {
        let key = OverrideKey {
            kind,
            id: id.to_string(),
            phase,
        };
        let removed = self.overrides.remove(&key);
        if removed.is_some() {
            self.version = next_version();
        }
        removed
    }

    /// Looks up the override stored for one phase of an entity.
    pub fn override_for(&self, kind: EntityKind, id: &str, phase: Phase) -> Option<&PhaseOverride> {
        self.overrides.get(&OverrideKey {
            kind,
            id: id.to_string(),
            phase,
        })
    }

    /// Resolves the effective schedule of one phase for an entity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigResolution`] when the production calendar
    /// claims to inherit or carries negative hours, or when an applied
    /// override carries negative hours.
    pub fn resolve(&self, entity: &EntityRef, phase: Phase) -> EngineResult<PhaseConfig> {
        let root = self.production.phase(phase);
        if root.inherit_from_parent {
            return Err(EngineError::resolution(
                phase,
                "production calendar has no parent to inherit from",
            ));
        }
        if root.default_hours_per_day < Decimal::ZERO {
            return Err(EngineError::resolution(
                phase,
                format!(
                    "production default hours must not be negative (got {})",
                    root.default_hours_per_day
                ),
            ));
        }

        let mut resolved = root.clone();
        let mut source = "production";

        // Least specific first, so each applied level merges over its resolved parent.
        for (kind, id) in entity.chain().into_iter().rev() {
            let Some(phase_override) = self.override_for(kind, id, phase) else {
                continue;
            };
            if phase_override.inherit_from_parent {
                continue;
            }
            resolved = apply_override(resolved, phase_override, phase)?;
            source = match kind {
                EntityKind::Department => "department",
                EntityKind::LineItem => "line_item",
            };
        }

        tracing::debug!(
            entity = ?entity,
            phase = %phase,
            source,
            days = resolved.days(),
            hours = %resolved.default_hours_per_day,
            version = self.version,
            "Resolved phase calendar"
        );

        Ok(resolved)
    }

    /// Resolves every phase for an entity.
    pub fn resolve_all(&self, entity: &EntityRef) -> EngineResult<BTreeMap<Phase, PhaseConfig>> {
        Phase::ALL
            .into_iter()
            .map(|phase| self.resolve(entity, phase).map(|config| (phase, config)))
            .collect()
    }
}

fn apply_override(
    parent: PhaseConfig,
    phase_override: &PhaseOverride,
    phase: Phase,
) -> EngineResult<PhaseConfig> {
    let default_hours_per_day = match phase_override.default_hours_per_day {
        Some(hours) if hours < Decimal::ZERO => {
            return Err(EngineError::resolution(
                phase,
                format!("override default hours must not be negative (got {})", hours),
            ));
        }
        Some(hours) => hours,
        None => parent.default_hours_per_day,
    };

    Ok(PhaseConfig {
        default_hours_per_day,
        working_dates: phase_override
            .working_dates
            .clone()
            .unwrap_or(parent.working_dates),
        inherit_from_parent: false,
    })
}

impl Default for CalendarCascade {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}

// Version stamps differ between equal cascades built separately
impl PartialEq for CalendarCascade {
    fn eq(&self, other: &Self) -> bool {
        self.production == other.production && self.overrides == other.overrides
    }
}

impl From<CascadeSnapshot> for CalendarCascade {
    fn from(snapshot: CascadeSnapshot) -> Self {
        let mut cascade = CalendarCascade::new(snapshot.production);
        let levels = [
            (EntityKind::Department, snapshot.departments),
            (EntityKind::LineItem, snapshot.line_items),
        ];
        for (kind, entities) in levels {
            for (id, phases) in entities {
                for (phase, phase_override) in phases {
                    cascade.overrides.insert(
                        OverrideKey {
                            kind,
                            id: id.clone(),
                            phase,
                        },
                        phase_override,
                    );
                }
            }
        }
        cascade
    }
}

/// Memo of resolved phase configs keyed by `(entity, phase, version)`.
///
/// Entries for any other cascade version are never returned; they are dropped
/// the first time a different version is seen. Versions are unique across
/// cascades, so one memo can be handed several productions in turn.
#[derive(Debug, Default)]
pub struct ResolutionMemo {
    version: u64,
    entries: HashMap<(EntityRef, Phase), PhaseConfig>,
}

impl ResolutionMemo {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoized entries for the current version.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the memoized resolution, resolving and storing it on a miss.
    pub fn resolve(
        &mut self,
        cascade: &CalendarCascade,
        entity: &EntityRef,
        phase: Phase,
    ) -> EngineResult<PhaseConfig> {
        if cascade.version() != self.version {
            self.entries.clear();
            self.version = cascade.version();
        }

        let key = (entity.clone(), phase);
        if let Some(config) = self.entries.get(&key) {
            return Ok(config.clone());
        }

        let config = cascade.resolve(entity, phase)?;
        self.entries.insert(key, config.clone());
        Ok(config)
    }
}
