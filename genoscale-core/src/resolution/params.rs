//! Named numeric parameters that scale ranges can refer to.
//!
//! The store is shared by handle. Each parameter carries a generation that
//! advances whenever its value changes, so dependents can tell whether they
//! need to re-evaluate without registering callbacks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Result, ScaleError};
use crate::scale::RangeElement;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Param {
    value: f64,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    params: Rc<RefCell<HashMap<String, Param>>>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value. Returns `true` if it differs from the previous one.
    pub fn set(&self, name: &str, value: f64) -> bool {
        let mut params = self.params.borrow_mut();
        match params.get_mut(name) {
            Some(param) if param.value == value => false,
            Some(param) => {
                param.value = value;
                param.generation += 1;
                true
            }
            None => {
                params.insert(name.to_string(), Param { value, generation: 0 });
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.params.borrow().get(name).map(|param| param.value)
    }

    pub fn generation(&self, name: &str) -> Option<u64> {
        self.params.borrow().get(name).map(|param| param.generation)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.borrow().contains_key(name)
    }
}

/// A range with at least one parameter reference. Evaluated as a group.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DynamicRange {
    elements: Vec<RangeElement>,
    reverse: bool,
    generations: Vec<Option<u64>>,
}

impl DynamicRange {
    pub(crate) fn new(elements: Vec<RangeElement>, reverse: bool) -> Self {
        Self {
            elements,
            reverse,
            generations: Vec::new(),
        }
    }

    /// Evaluates every element and remembers the generations it saw.
    pub(crate) fn evaluate(&mut self, params: &ParamStore) -> Result<Vec<f64>> {
        let values = evaluate_range(&self.elements, self.reverse, params)?;
        self.generations = self.current_generations(params);
        Ok(values)
    }

    pub(crate) fn is_stale(&self, params: &ParamStore) -> bool {
        self.current_generations(params) != self.generations
    }

    fn current_generations(&self, params: &ParamStore) -> Vec<Option<u64>> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                RangeElement::Expr { expr } => Some(params.generation(expr)),
                RangeElement::Value(_) => None,
            })
            .collect()
    }
}

/// Resolves literals and parameter references, then applies `reverse`.
pub fn evaluate_range(elements: &[RangeElement], reverse: bool, params: &ParamStore) -> Result<Vec<f64>> {
    let mut values = elements
        .iter()
        .map(|element| match element {
            RangeElement::Value(value) => Ok(*value),
            RangeElement::Expr { expr } => params
                .get(expr)
                .ok_or_else(|| ScaleError::UnknownParam(expr.clone())),
        })
        .collect::<Result<Vec<_>>>()?;
    if reverse {
        values.reverse();
    }
    Ok(values)
}
