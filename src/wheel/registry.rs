use crate::foundation::core::Color;
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};
use crate::wheel::model::Wheel;

/// Default registry capacity.
pub const DEFAULT_MAX_WHEELS: usize = 5;

/// Bounded, ordered collection of wheels.
///
/// Insertion order is draw order. Removal compacts the remaining wheels and keeps their relative
/// order, so indices stay dense in `[0, len)`.
#[derive(Clone, Debug)]
pub struct WheelRegistry {
    wheels: Vec<Wheel>,
    max_wheels: usize,
}

impl Default for WheelRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WHEELS)
    }
}

impl WheelRegistry {
    /// Empty registry holding at most `max_wheels` wheels.
    pub fn new(max_wheels: usize) -> Self {
        Self {
            wheels: Vec::with_capacity(max_wheels.min(64)),
            max_wheels,
        }
    }

    /// Number of registered wheels.
    pub fn len(&self) -> usize {
        self.wheels.len()
    }

    /// Whether no wheel is registered.
    pub fn is_empty(&self) -> bool {
        self.wheels.is_empty()
    }

    /// Registry capacity.
    pub fn max_wheels(&self) -> usize {
        self.max_wheels
    }

    /// Wheel at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Wheel> {
        self.wheels.get(index)
    }

    /// Wheels in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, Wheel> {
        self.wheels.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Wheel> {
        self.wheels.iter_mut()
    }

    pub(crate) fn set_max_wheels(&mut self, max_wheels: usize) {
        self.max_wheels = max_wheels;
    }

    /// Append a wheel; returns its index.
    pub fn push(&mut self, wheel: Wheel) -> PrimeWheelResult<usize> {
        if self.wheels.len() >= self.max_wheels {
            return Err(PrimeWheelError::CapacityExceeded {
                max: self.max_wheels,
            });
        }
        self.wheels.push(wheel);
        Ok(self.wheels.len() - 1)
    }

    /// Remove the wheel at `index`, shifting later wheels down by one.
    pub fn remove(&mut self, index: usize) -> PrimeWheelResult<Wheel> {
        self.check_index(index)?;
        Ok(self.wheels.remove(index))
    }

    /// Replace the glyph color of the wheel at `index`.
    pub fn set_color(&mut self, index: usize, color: Color) -> PrimeWheelResult<()> {
        self.check_index(index)?;
        self.wheels[index].config.color = color;
        Ok(())
    }

    /// Drop every wheel.
    pub(crate) fn clear(&mut self) {
        self.wheels.clear();
    }

    fn check_index(&self, index: usize) -> PrimeWheelResult<()> {
        if index >= self.wheels.len() {
            return Err(PrimeWheelError::IndexOutOfRange {
                index,
                count: self.wheels.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a WheelRegistry {
    type Item = &'a Wheel;
    type IntoIter = std::slice::Iter<'a, Wheel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/registry.rs"]
mod tests;
