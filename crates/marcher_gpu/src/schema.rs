//! Uniform schema: the fixed, ordered set of named slots a linked program
//! accepts each frame.
//!
//! Validation and upload planning are pure so the per-frame contract can
//! be tested without a GL context; only location resolution touches GL.

use glow::HasContext;

use crate::error::{GpuError, Result};
use crate::uniform::{TypeTag, UniformArgument, UniformValue};

/// One schema entry: a name, its declared type, and the location resolved
/// from the linked program.
///
/// `location == None` means the uniform was not found in the linked
/// program. That is not an error: the driver is free to discard a uniform
/// the shader never uses, and uploads for such a slot are skipped.
#[derive(Debug, Clone)]
pub struct UniformSlot {
    pub(crate) name: String,
    pub(crate) ty: TypeTag,
    pub(crate) location: Option<glow::UniformLocation>,
}

impl UniformSlot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> TypeTag {
        self.ty
    }

    /// Whether the linked program exposes this uniform.
    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }
}

/// An ordered, name-unique collection of [`UniformSlot`]s.
///
/// Immutable once its program is built; slot order is declaration order
/// and determines upload order.
#[derive(Debug, Clone)]
pub struct UniformSchema {
    slots: Vec<UniformSlot>,
}

impl UniformSchema {
    /// Build a schema from declared `(name, type)` pairs, preserving
    /// declaration order. All locations start unresolved.
    ///
    /// Fails with [`GpuError::DuplicateUniformName`] if two declarations
    /// share a name.
    pub fn from_declared(declared: &[(&str, TypeTag)]) -> Result<Self> {
        let mut slots: Vec<UniformSlot> = Vec::with_capacity(declared.len());
        for &(name, ty) in declared {
            if slots.iter().any(|slot| slot.name == name) {
                return Err(GpuError::DuplicateUniformName {
                    name: name.to_string(),
                });
            }
            slots.push(UniformSlot {
                name: name.to_string(),
                ty,
                location: None,
            });
        }
        Ok(Self { slots })
    }

    /// Query the linked program for every slot's location.
    ///
    /// Called exactly once, by the builder; `set_uniforms` only ever reads
    /// the cached values.
    pub(crate) fn resolve_locations(&mut self, gl: &glow::Context, program: glow::Program) {
        for slot in &mut self.slots {
            slot.location = unsafe { gl.get_uniform_location(program, &slot.name) };
            if slot.location.is_none() {
                log::debug!(
                    "uniform '{}' is not active in the linked program; uploads will be skipped",
                    slot.name
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = &UniformSlot> {
        self.slots.iter()
    }

    /// Slot names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Validate a frame's argument set against this schema.
    ///
    /// The argument names must equal the schema's name set exactly (no
    /// missing, no extra, no duplicate names) and every value's tag must
    /// equal its slot's declared tag. On success the values are returned
    /// reordered into schema order.
    pub fn match_arguments<'a>(
        &self,
        values: &'a [UniformArgument],
    ) -> Result<Vec<&'a UniformValue>> {
        let mut duplicates: Vec<String> = Vec::new();
        for (i, arg) in values.iter().enumerate() {
            if values[..i].iter().any(|prev| prev.name == arg.name)
                && !duplicates.contains(&arg.name)
            {
                duplicates.push(arg.name.clone());
            }
        }

        let mut unexpected: Vec<String> = Vec::new();
        for arg in values {
            if !self.slots.iter().any(|slot| slot.name == arg.name)
                && !unexpected.contains(&arg.name)
            {
                unexpected.push(arg.name.clone());
            }
        }

        let mut missing: Vec<String> = Vec::new();
        let mut matched: Vec<&'a UniformArgument> = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            match values.iter().find(|arg| arg.name == slot.name) {
                Some(arg) => matched.push(arg),
                None => missing.push(slot.name.clone()),
            }
        }

        if !missing.is_empty() || !unexpected.is_empty() || !duplicates.is_empty() {
            return Err(GpuError::SchemaMismatch {
                missing,
                unexpected,
                duplicates,
            });
        }

        for (slot, arg) in self.slots.iter().zip(&matched) {
            let actual = arg.value.type_tag();
            if actual != slot.ty {
                return Err(GpuError::TypeMismatch {
                    name: slot.name.clone(),
                    expected: slot.ty,
                    actual,
                });
            }
        }

        Ok(matched.into_iter().map(|arg| &arg.value).collect())
    }

    /// Validate an argument set and pair each value with its slot's cached
    /// location, in schema order. Unresolved slots are dropped from the
    /// plan. A failed validation yields no plan at all, so a failing call
    /// never performs a partial upload.
    pub fn upload_plan<'a>(
        &self,
        values: &'a [UniformArgument],
    ) -> Result<Vec<(glow::UniformLocation, &'a UniformValue)>> {
        let matched = self.match_arguments(values)?;
        Ok(self
            .slots
            .iter()
            .zip(matched)
            .filter_map(|(slot, value)| slot.location.clone().map(|loc| (loc, value)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn loc(i: u32) -> glow::UniformLocation {
        glow::NativeUniformLocation(i)
    }

    fn test_schema() -> UniformSchema {
        UniformSchema::from_declared(&[("time", TypeTag::Float), ("origin", TypeTag::Vec3)])
            .unwrap()
    }

    /// Same schema with every slot resolved.
    fn resolved_schema() -> UniformSchema {
        let mut schema = test_schema();
        for (i, slot) in schema.slots.iter_mut().enumerate() {
            slot.location = Some(loc(i as u32));
        }
        schema
    }

    fn valid_values() -> Vec<UniformArgument> {
        vec![
            UniformArgument::new("time", 1.5),
            UniformArgument::new("origin", Vec3::ZERO),
        ]
    }

    #[test]
    fn test_declaration_order_preserved() {
        let schema = test_schema();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, ["time", "origin"]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let result =
            UniformSchema::from_declared(&[("time", TypeTag::Float), ("time", TypeTag::Vec3)]);
        match result {
            Err(GpuError::DuplicateUniformName { name }) => assert_eq!(name, "time"),
            other => panic!("expected DuplicateUniformName, got {:?}", other),
        }
    }

    #[test]
    fn test_new_slots_start_unresolved() {
        let schema = test_schema();
        assert!(schema.slots().all(|slot| !slot.is_resolved()));
    }

    #[test]
    fn test_plan_covers_every_resolved_slot_in_order() {
        let schema = resolved_schema();
        let values = valid_values();
        let plan = schema.upload_plan(&values).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].0, loc(0));
        assert_eq!(plan[0].1, &UniformValue::Float(1.5));
        assert_eq!(plan[1].0, loc(1));
        assert_eq!(plan[1].1, &UniformValue::Vec3(Vec3::ZERO));
    }

    #[test]
    fn test_plan_reorders_arguments_into_schema_order() {
        let schema = resolved_schema();
        let values = vec![
            UniformArgument::new("origin", Vec3::ZERO),
            UniformArgument::new("time", 1.5),
        ];
        let plan = schema.upload_plan(&values).unwrap();

        assert_eq!(plan[0].1, &UniformValue::Float(1.5));
        assert_eq!(plan[1].1, &UniformValue::Vec3(Vec3::ZERO));
    }

    #[test]
    fn test_plan_skips_unresolved_slots() {
        let mut schema = resolved_schema();
        schema.slots[0].location = None;

        let values = valid_values();
        let plan = schema.upload_plan(&values).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].0, loc(1));
        assert_eq!(plan[0].1, &UniformValue::Vec3(Vec3::ZERO));
    }

    #[test]
    fn test_missing_argument_rejected() {
        let schema = resolved_schema();
        let values = vec![UniformArgument::new("time", 1.5)];
        match schema.upload_plan(&values) {
            Err(GpuError::SchemaMismatch {
                missing,
                unexpected,
                duplicates,
            }) => {
                assert_eq!(missing, ["origin"]);
                assert!(unexpected.is_empty());
                assert!(duplicates.is_empty());
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_argument_rejected() {
        let schema = resolved_schema();
        let mut values = valid_values();
        values.push(UniformArgument::new("speed", 2.0));
        match schema.upload_plan(&values) {
            Err(GpuError::SchemaMismatch { unexpected, .. }) => {
                assert_eq!(unexpected, ["speed"]);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let schema = resolved_schema();
        let mut values = valid_values();
        values.push(UniformArgument::new("time", 2.0));
        match schema.upload_plan(&values) {
            Err(GpuError::SchemaMismatch { duplicates, .. }) => {
                assert_eq!(duplicates, ["time"]);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_rejected() {
        let schema = resolved_schema();
        let values = vec![
            UniformArgument::new("time", Vec3::ZERO),
            UniformArgument::new("origin", Vec3::ZERO),
        ];
        match schema.upload_plan(&values) {
            Err(GpuError::TypeMismatch {
                name,
                expected,
                actual,
            }) => {
                assert_eq!(name, "time");
                assert_eq!(expected, TypeTag::Float);
                assert_eq!(actual, TypeTag::Vec3);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_planning_is_idempotent() {
        let schema = resolved_schema();
        let values = valid_values();
        let first = schema.upload_plan(&values).unwrap();
        let second = schema.upload_plan(&values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_schema_accepts_empty_values_only() {
        let schema = UniformSchema::from_declared(&[]).unwrap();
        assert!(schema.is_empty());
        assert!(schema.upload_plan(&[]).unwrap().is_empty());
        assert!(
            schema
                .upload_plan(&[UniformArgument::new("time", 1.0)])
                .is_err()
        );
    }
}
