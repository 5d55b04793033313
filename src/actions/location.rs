//! Location arithmetic commands
//!
//! ```text
//! loc div <source> with <target>
//! loc div <source> <x> <y> <z> [-yaw <n>] [-pitch <n>]
//! loc div <source> [-x <n>] [-y <n>] [-z <n>] [-yaw <n>] [-pitch <n>]
//! ```
//!
//! Three grammars per operator, selected on the shape of the token
//! after the source: an object form introduced by `with` applying one
//! full location field by field, a positional-numeric form, and a
//! named-flag form. Absent optional operands fall back to the
//! operator's identity, so `loc div &pos 2 2 2` leaves yaw and pitch
//! untouched. Each of the five fields combines with its own operand.

use super::args;
use crate::frontend::reader::is_number;
use crate::frontend::{combine2, combine6, CommandRegistry, Deferred, ParseError, TokenReader};
use crate::runtime::{Action, Location, Value};

pub(crate) fn register(registry: &mut CommandRegistry) {
    registry.insert(&["loc", "location"], resolve);
}

fn resolve(reader: &mut TokenReader) -> Result<Action<Value>, ParseError> {
    let op = reader.next_token()?;
    match op.text.as_str() {
        "add" | "plus" => arithmetic(reader, Op::Add),
        "sub" | "minus" => arithmetic(reader, Op::Sub),
        "mul" | "times" => arithmetic(reader, Op::Mul),
        "div" | "divide" => arithmetic(reader, Op::Div),
        other => Err(ParseError::UnknownCommand(format!("loc {other}"))),
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Operand leaving a field unchanged
    fn identity(self) -> f64 {
        match self {
            Op::Add | Op::Sub => 0.0,
            Op::Mul | Op::Div => 1.0,
        }
    }

    fn apply(self, field: f64, operand: f64) -> f64 {
        match self {
            Op::Add => field + operand,
            Op::Sub => field - operand,
            Op::Mul => field * operand,
            Op::Div => field / operand,
        }
    }

    fn apply_f32(self, field: f32, operand: f32) -> f32 {
        self.apply(field as f64, operand as f64) as f32
    }
}

/// Apply `op` to every field of `loc`, one operand per field
fn merge(op: Op, mut loc: Location, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Location {
    loc.x = op.apply(loc.x, x);
    loc.y = op.apply(loc.y, y);
    loc.z = op.apply(loc.z, z);
    loc.yaw = op.apply_f32(loc.yaw, yaw);
    loc.pitch = op.apply_f32(loc.pitch, pitch);
    loc
}

fn arithmetic(reader: &mut TokenReader, op: Op) -> Result<Action<Value>, ParseError> {
    let mut source = args::location();
    // consume the source's tokens now so the branch probe sees what
    // follows them; the later combine re-build hits the memo
    source.build(reader)?;

    let merged: Deferred<Location> = if reader.peek_is("with") {
        combine2(
            source,
            args::location().expect(&["with"]),
            move |loc, target| {
                Ok(merge(
                    op, loc, target.x, target.y, target.z, target.yaw, target.pitch,
                ))
            },
        )
    } else if reader.peek_token().is_some_and(|t| is_number(&t.text)) {
        combine6(
            source,
            args::double(),
            args::double(),
            args::double(),
            args::flag(&["-yaw"], args::float()),
            args::flag(&["-pitch", "-p"], args::float()),
            move |loc, x, y, z, yaw, pitch| {
                let fallback = op.identity() as f32;
                Ok(merge(
                    op,
                    loc,
                    x,
                    y,
                    z,
                    yaw.unwrap_or(fallback),
                    pitch.unwrap_or(fallback),
                ))
            },
        )
    } else {
        combine6(
            source,
            args::flag(&["-x"], args::double()),
            args::flag(&["-y"], args::double()),
            args::flag(&["-z"], args::double()),
            args::flag(&["-yaw"], args::float()),
            args::flag(&["-pitch", "-p"], args::float()),
            move |loc, x, y, z, yaw, pitch| {
                let identity = op.identity();
                let fallback = identity as f32;
                Ok(merge(
                    op,
                    loc,
                    x.unwrap_or(identity),
                    y.unwrap_or(identity),
                    z.unwrap_or(identity),
                    yaw.unwrap_or(fallback),
                    pitch.unwrap_or(fallback),
                ))
            },
        )
    };

    args::built(merged.map(Value::Location), reader)
}
