//! Fuentes de progreso: deciden cuánto avanza una ejecución por tick y si
//! termina bien al llegar a 100.
//!
//! `RandomProgress` es la fuente real (incremento uniforme en
//! `[PROGRESS_INCREMENT_MIN, PROGRESS_INCREMENT_MAX]`, éxito con probabilidad
//! `SUCCESS_PROBABILITY`). `ScriptedProgress` reproduce una secuencia fija y
//! sirve para tests deterministas.
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{PROGRESS_INCREMENT_MAX, PROGRESS_INCREMENT_MIN, SUCCESS_PROBABILITY};

pub trait ProgressSource: Send {
    /// Incremento del próximo tick.
    fn increment(&mut self) -> u8;
    /// Resultado de una ejecución que llegó a 100.
    fn succeeds(&mut self) -> bool;
}

#[derive(Debug)]
pub struct RandomProgress {
    rng: StdRng,
}

impl RandomProgress {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Fuente reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSource for RandomProgress {
    fn increment(&mut self) -> u8 {
        self.rng.gen_range(PROGRESS_INCREMENT_MIN..=PROGRESS_INCREMENT_MAX)
    }

    fn succeeds(&mut self) -> bool {
        self.rng.gen_bool(SUCCESS_PROBABILITY)
    }
}

/// Secuencia guionada. Agotada la cola, usa incrementos de 10 y éxito.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProgress {
    increments: VecDeque<u8>,
    outcomes: VecDeque<bool>,
}

impl ScriptedProgress {
    pub fn new(increments: impl IntoIterator<Item = u8>, outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self { increments: increments.into_iter().collect(),
               outcomes: outcomes.into_iter().collect() }
    }

    /// Ejecuciones que completan en `ticks` ticks con los resultados dados.
    pub fn uniform(ticks: u8, outcomes: impl IntoIterator<Item = bool>) -> Self {
        let outcomes: VecDeque<bool> = outcomes.into_iter().collect();
        let step = 100u8.div_ceil(ticks.max(1));
        let runs = outcomes.len().max(1);
        Self { increments: std::iter::repeat(step).take(ticks as usize * runs).collect(),
               outcomes }
    }
}

impl ProgressSource for ScriptedProgress {
    fn increment(&mut self) -> u8 {
        self.increments.pop_front().unwrap_or(10)
    }

    fn succeeds(&mut self) -> bool {
        self.outcomes.pop_front().unwrap_or(true)
    }
}
