//! The four element meters: air, earth, fire and water.
//!
//! Every meter is clamped to `[0, 100]`. A meter sitting exactly on either
//! bound is an [`Extreme`], which is what sends the story to an ending.

mod deltas;

pub use deltas::*;

use serde::{Deserialize, Serialize};

/// Lowest value a meter can hold.
pub const METER_MIN: i32 = 0;

/// Highest value a meter can hold.
pub const METER_MAX: i32 = 100;

/// Element meters, declared in canonical order.
///
/// The derived `Ord` follows declaration order and is relied upon for the
/// extreme tie-break, so do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Air,
    Earth,
    Fire,
    Water,
}

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; 4] = [Element::Air, Element::Earth, Element::Fire, Element::Water];

    /// The lowercase name used in deck files and extreme ids.
    pub fn name(&self) -> &'static str {
        match self {
            Element::Air => "air",
            Element::Earth => "earth",
            Element::Fire => "fire",
            Element::Water => "water",
        }
    }

    /// Look up an element by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which end of the range a meter hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Empty,
    Full,
}

impl Bound {
    pub fn value(&self) -> i32 {
        match self {
            Bound::Empty => METER_MIN,
            Bound::Full => METER_MAX,
        }
    }
}

/// A meter resting exactly on one of its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extreme {
    pub element: Element,
    pub bound: Bound,
}

impl Extreme {
    pub fn new(element: Element, bound: Bound) -> Self {
        Self { element, bound }
    }

    /// Every possible extreme, canonical element order, empty before full.
    pub fn all() -> impl Iterator<Item = Extreme> {
        Element::ALL.into_iter().flat_map(|element| {
            [Bound::Empty, Bound::Full]
                .into_iter()
                .map(move |bound| Extreme::new(element, bound))
        })
    }

    /// The id an ending card is keyed by, e.g. `fire_100`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.element, self.bound.value())
    }

    /// Parse an id of the form `{element}_{0|100}`.
    pub fn parse(id: &str) -> Option<Self> {
        let (name, value) = id.split_once('_')?;
        let element = Element::from_name(name)?;
        let bound = match value {
            "0" => Bound::Empty,
            "100" => Bound::Full,
            _ => return None,
        };
        Some(Self::new(element, bound))
    }
}

impl std::fmt::Display for Extreme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.element, self.bound.value())
    }
}

/// Current value of every element meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceState {
    pub air: i32,
    pub earth: i32,
    pub fire: i32,
    pub water: i32,
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::uniform(1)
    }
}

impl ResourceState {
    /// All four meters at the same (clamped) value.
    pub fn uniform(value: i32) -> Self {
        let value = value.clamp(METER_MIN, METER_MAX);
        Self {
            air: value,
            earth: value,
            fire: value,
            water: value,
        }
    }

    pub fn get(&self, element: Element) -> i32 {
        match element {
            Element::Air => self.air,
            Element::Earth => self.earth,
            Element::Fire => self.fire,
            Element::Water => self.water,
        }
    }

    /// Set a meter, clamping into range.
    pub fn set(&mut self, element: Element, value: i32) {
        let value = value.clamp(METER_MIN, METER_MAX);
        match element {
            Element::Air => self.air = value,
            Element::Earth => self.earth = value,
            Element::Fire => self.fire = value,
            Element::Water => self.water = value,
        }
    }

    /// Whether every meter is inside `[0, 100]`.
    pub fn is_within_bounds(&self) -> bool {
        Element::ALL
            .iter()
            .all(|e| (METER_MIN..=METER_MAX).contains(&self.get(*e)))
    }

    /// Apply a set of deltas, returning the new state and the extreme it
    /// landed on, if any.
    ///
    /// Every delta is computed against `self`, never against a partially
    /// updated state. Elements the deltas do not mention are copied as-is.
    pub fn apply(&self, deltas: &ElementDeltas) -> (ResourceState, Option<Extreme>) {
        let mut next = *self;
        for (element, delta) in deltas.iter() {
            next.set(element, self.get(element).saturating_add(delta));
        }
        let extreme = next.first_extreme();
        (next, extreme)
    }

    /// The first meter in canonical order sitting on a bound.
    pub fn first_extreme(&self) -> Option<Extreme> {
        Element::ALL.into_iter().find_map(|element| match self.get(element) {
            METER_MIN => Some(Extreme::new(element, Bound::Empty)),
            METER_MAX => Some(Extreme::new(element, Bound::Full)),
            _ => None,
        })
    }

    /// Fill level of a meter as a percentage, for gauges.
    pub fn fill_percent(&self, element: Element) -> u8 {
        self.get(element).clamp(METER_MIN, METER_MAX) as u8
    }
}
