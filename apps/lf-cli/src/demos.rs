//! Demonstration circuits built through the session API.

use clap::ValueEnum;
use lf_app::{AppResult, BatchEdit, CircuitSession};
use lf_core::CompId;
use lf_core::ComponentKind::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    And,
    HalfAdder,
    FullAdder,
    RingOscillator,
    NorLoop,
}

impl Demo {
    pub const ALL: [Demo; 5] = [
        Demo::And,
        Demo::HalfAdder,
        Demo::FullAdder,
        Demo::RingOscillator,
        Demo::NorLoop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demo::And => "and",
            Demo::HalfAdder => "half-adder",
            Demo::FullAdder => "full-adder",
            Demo::RingOscillator => "ring-oscillator",
            Demo::NorLoop => "nor-loop",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::And => "two inputs into an AND gate",
            Demo::HalfAdder => "XOR sum and AND carry",
            Demo::FullAdder => "two half adders with an OR carry",
            Demo::RingOscillator => "three inverters in a loop; never settles",
            Demo::NorLoop => "cross-coupled NOR latch with set and reset",
        }
    }

    /// Build this circuit into `session` as one batch.
    pub fn build(self, session: &mut CircuitSession) -> AppResult<()> {
        session.batch(|edit| match self {
            Demo::And => and(edit),
            Demo::HalfAdder => half_adder(edit),
            Demo::FullAdder => full_adder(edit),
            Demo::RingOscillator => ring_oscillator(edit),
            Demo::NorLoop => nor_loop(edit),
        })?;
        Ok(())
    }
}

/// Place a column of components at `x`.
fn column(
    edit: &mut BatchEdit<'_>,
    kind: ComponentKind,
    x: f64,
    count: usize,
) -> AppResult<Vec<CompId>> {
    (0..count)
        .map(|row| edit.add_component(kind, (x, row as f64 * 60.0)))
        .collect()
}

fn and(edit: &mut BatchEdit<'_>) -> AppResult<()> {
    let ins = column(edit, Input, 0.0, 2)?;
    let gate = edit.add_component(And, (120.0, 30.0))?;
    let out = edit.add_component(Output, (240.0, 30.0))?;
    edit.wire(ins[0], gate, 0)?;
    edit.wire(ins[1], gate, 1)?;
    edit.wire(gate, out, 0)?;
    Ok(())
}

fn half_adder(edit: &mut BatchEdit<'_>) -> AppResult<()> {
    let ins = column(edit, Input, 0.0, 2)?;
    let sum = edit.add_component(Xor, (120.0, 0.0))?;
    let carry = edit.add_component(And, (120.0, 60.0))?;
    let outs = column(edit, Output, 240.0, 2)?;
    for gate in [sum, carry] {
        edit.wire(ins[0], gate, 0)?;
        edit.wire(ins[1], gate, 1)?;
    }
    edit.wire(sum, outs[0], 0)?;
    edit.wire(carry, outs[1], 0)?;
    Ok(())
}

fn full_adder(edit: &mut BatchEdit<'_>) -> AppResult<()> {
    // A, B, Cin
    let ins = column(edit, Input, 0.0, 3)?;
    let x1 = edit.add_component(Xor, (120.0, 0.0))?;
    let a1 = edit.add_component(And, (120.0, 60.0))?;
    let x2 = edit.add_component(Xor, (240.0, 0.0))?;
    let a2 = edit.add_component(And, (240.0, 60.0))?;
    let carry = edit.add_component(Or, (360.0, 60.0))?;
    let outs = column(edit, Output, 480.0, 2)?;

    edit.wire(ins[0], x1, 0)?;
    edit.wire(ins[1], x1, 1)?;
    edit.wire(ins[0], a1, 0)?;
    edit.wire(ins[1], a1, 1)?;
    edit.wire(x1, x2, 0)?;
    edit.wire(ins[2], x2, 1)?;
    edit.wire(x1, a2, 0)?;
    edit.wire(ins[2], a2, 1)?;
    edit.wire(a1, carry, 0)?;
    edit.wire(a2, carry, 1)?;
    edit.wire(x2, outs[0], 0)?;
    edit.wire(carry, outs[1], 0)?;
    Ok(())
}

fn ring_oscillator(edit: &mut BatchEdit<'_>) -> AppResult<()> {
    let nots = column(edit, Not, 120.0, 3)?;
    let out = edit.add_component(Output, (240.0, 0.0))?;
    edit.wire(nots[0], nots[1], 0)?;
    edit.wire(nots[1], nots[2], 0)?;
    edit.wire(nots[2], nots[0], 0)?;
    edit.wire(nots[0], out, 0)?;
    Ok(())
}

fn nor_loop(edit: &mut BatchEdit<'_>) -> AppResult<()> {
    // S, R
    let ins = column(edit, Input, 0.0, 2)?;
    let q = edit.add_component(Nor, (120.0, 0.0))?;
    let q_bar = edit.add_component(Nor, (120.0, 60.0))?;
    let outs = column(edit, Output, 240.0, 2)?;

    edit.wire(ins[1], q, 0)?;
    edit.wire(q_bar, q, 1)?;
    edit.wire(ins[0], q_bar, 0)?;
    edit.wire(q, q_bar, 1)?;
    edit.wire(q, outs[0], 0)?;
    edit.wire(q_bar, outs[1], 0)?;
    Ok(())
}
