//! Item attributes and how contributions combine

use serde::{Deserialize, Serialize};

/// Accumulation rule of an attribute contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOperation {
    /// Summed, scaled by stack quantity
    Add,
    /// Multiplied into a factor, once per stack
    Multiply,
    /// Replaces the resolved value, last stack in slot order wins
    Override,
}

impl Default for AttributeOperation {
    fn default() -> Self {
        Self::Add
    }
}

/// One attribute entry of an item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub attribute_id: String,
    #[serde(default)]
    pub operation: AttributeOperation,
    pub value: f32,
}

impl ItemAttribute {
    pub fn new(attribute_id: impl Into<String>, operation: AttributeOperation, value: f32) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            operation,
            value,
        }
    }

    /// Entries with a blank ID or a non-finite value are ignored
    pub fn is_valid(&self) -> bool {
        !self.attribute_id.trim().is_empty() && self.value.is_finite()
    }

    /// Contribution of a stack holding `quantity` units of the item
    pub fn scaled(&self, quantity: u32) -> f32 {
        match self.operation {
            AttributeOperation::Add => self.value * quantity as f32,
            AttributeOperation::Multiply | AttributeOperation::Override => self.value,
        }
    }
}

/// Folds contributions to a single attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeAccumulator {
    additive: f32,
    multiplier: f32,
    override_value: Option<f32>,
    contributions: usize,
}

impl AttributeAccumulator {
    pub fn new() -> Self {
        Self {
            additive: 0.0,
            multiplier: 1.0,
            override_value: None,
            contributions: 0,
        }
    }

    /// Fold one stack's contribution
    pub fn accumulate(&mut self, attribute: &ItemAttribute, quantity: u32) {
        if !attribute.is_valid() || quantity == 0 {
            return;
        }

        let value = attribute.scaled(quantity);
        match attribute.operation {
            AttributeOperation::Add => self.additive += value,
            AttributeOperation::Multiply => self.multiplier *= value,
            AttributeOperation::Override => self.override_value = Some(value),
        }
        self.contributions += 1;
    }

    pub fn has_contribution(&self) -> bool {
        self.contributions > 0
    }

    /// Resolve against a baseline value
    pub fn resolve(&self, base: f32) -> f32 {
        match self.override_value {
            Some(value) => value,
            None => (base + self.additive) * self.multiplier,
        }
    }
}

impl Default for AttributeAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
