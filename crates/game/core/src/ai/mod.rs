//! Monster decision making.
//!
//! A monster's brain is a behavior tree evaluated against a
//! [`MonsterContext`] snapshot. The tree only records a [`MonsterAction`];
//! the caller applies it (combat resolution or a movement step), which keeps
//! the brain free of borrows into the world.
//!
//! Default chaser tree:
//!
//! ```text
//! Selector
//! ├── Sequence [TargetInAttackRange, Selector [AttackTarget, HoldPosition]]
//! └── Sequence [TargetInChaseRange, StepTowardTarget]
//! ```

mod tree;

pub use tree::{Behavior, Selector, Sequence, Status};

use crate::entity::{BrainKind, CooldownAttacker, Damageable, Monster, Positioned};
use crate::grid::{Direction, PixelRange, Position, within_range};

/// Boxed strategy object stored on every monster.
pub type MonsterBrain = dyn Behavior<MonsterContext>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterAction {
    Attack,
    Step(Direction),
    Wait,
}

/// Everything a brain may look at when choosing an action.
#[derive(Clone, Debug)]
pub struct MonsterContext {
    pub position: Position,
    pub target: Position,
    pub target_alive: bool,
    pub can_attack: bool,
    pub attack_range: PixelRange,
    pub chase_range: PixelRange,
    pub tile_size: i32,
    /// Indexed like [`Direction::ALL`]; true when that neighbour can be entered.
    open: [bool; 4],
    pub decision: Option<MonsterAction>,
}

impl MonsterContext {
    pub fn new(
        monster: &Monster,
        target: Position,
        target_alive: bool,
        tile_size: i32,
        is_open: impl Fn(Position) -> bool,
    ) -> Self {
        let position = monster.position();
        let open = Direction::ALL.map(|direction| is_open(position.step(direction)));
        Self {
            position,
            target,
            target_alive,
            can_attack: monster.can_attack(),
            attack_range: monster.attack_range(),
            chase_range: monster.chase_range(),
            tile_size,
            open,
            decision: None,
        }
    }

    pub fn is_open(&self, direction: Direction) -> bool {
        Direction::ALL
            .iter()
            .position(|candidate| *candidate == direction)
            .is_some_and(|index| self.open[index])
    }

    fn target_within(&self, range: PixelRange) -> bool {
        self.target_alive && within_range(self.position, self.target, range, self.tile_size)
    }
}

pub struct TargetInAttackRange;

impl Behavior<MonsterContext> for TargetInAttackRange {
    fn tick(&self, ctx: &mut MonsterContext) -> Status {
        Status::from_bool(ctx.target_within(ctx.attack_range))
    }
}

pub struct TargetInChaseRange;

impl Behavior<MonsterContext> for TargetInChaseRange {
    fn tick(&self, ctx: &mut MonsterContext) -> Status {
        Status::from_bool(ctx.target_within(ctx.chase_range))
    }
}

pub struct AttackTarget;

impl Behavior<MonsterContext> for AttackTarget {
    fn tick(&self, ctx: &mut MonsterContext) -> Status {
        if !ctx.can_attack {
            return Status::Failure;
        }
        ctx.decision = Some(MonsterAction::Attack);
        Status::Success
    }
}

pub struct HoldPosition;

impl Behavior<MonsterContext> for HoldPosition {
    fn tick(&self, ctx: &mut MonsterContext) -> Status {
        ctx.decision = Some(MonsterAction::Wait);
        Status::Success
    }
}

/// One step toward the target along the axis with the larger gap (vertical
/// on ties), falling back to the other axis when that step is blocked.
pub struct StepTowardTarget;

impl Behavior<MonsterContext> for StepTowardTarget {
    fn tick(&self, ctx: &mut MonsterContext) -> Status {
        let dx = ctx.target.x - ctx.position.x;
        let dy = ctx.target.y - ctx.position.y;
        let horizontal = Direction::horizontal(dx);
        let vertical = Direction::vertical(dy);

        let (primary, fallback) = if dx.abs() > dy.abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        let step = [primary, fallback]
            .into_iter()
            .flatten()
            .find(|direction| ctx.is_open(*direction));

        match step {
            Some(direction) => {
                ctx.decision = Some(MonsterAction::Step(direction));
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

type Ctx = MonsterContext;

/// Builds the behavior tree for a brain kind.
pub fn brain_for(kind: BrainKind) -> Box<MonsterBrain> {
    let engage: Box<MonsterBrain> = Box::new(Sequence::<Ctx>::new(vec![
        Box::new(TargetInAttackRange),
        Box::new(Selector::<Ctx>::new(vec![
            Box::new(AttackTarget),
            Box::new(HoldPosition),
        ])),
    ]));

    match kind {
        BrainKind::Chaser => Box::new(Selector::<Ctx>::new(vec![
            engage,
            Box::new(Sequence::<Ctx>::new(vec![
                Box::new(TargetInChaseRange),
                Box::new(StepTowardTarget),
            ])),
        ])),
        BrainKind::Stationary => engage,
    }
}
