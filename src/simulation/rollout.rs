use log::trace;
use serde::Serialize;

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum FlightState {
    Flying,
    Landed(Landing),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    Landed,
    Crashed(Landing),
    OutOfBounds,
    // commands ran out mid-flight
    Exhausted,
}

impl From<&FlightState> for Outcome {
    fn from(state: &FlightState) -> Self {
        match state {
            FlightState::Flying => Outcome::Exhausted,
            FlightState::Landed(Landing::Correct) => Outcome::Landed,
            FlightState::Landed(Landing::OutOfMap) => Outcome::OutOfBounds,
            FlightState::Landed(landing) => Outcome::Crashed(landing.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LanderStateCalculation {
    physics: Physics,
    collision_checker: CollisionChecker,
}

impl LanderStateCalculation {
    pub fn new(physics: Physics, collision_checker: CollisionChecker) -> Self {
        Self {
            physics,
            collision_checker,
        }
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn calculate_new_lander_state(
        &self,
        terrain: &Terrain,
        lander: &LanderState,
        cmd: Command,
    ) -> Result<(LanderState, FlightState), SimulationError> {
        let new_lander_state = self.physics.iterate(lander.clone(), cmd)?;
        if let Some((point, landing)) = self.collision_checker.check(terrain, &new_lander_state) {
            let landed = matches!(landing, Landing::Correct);
            Ok((
                LanderState {
                    position: point,
                    last_movement: Segment::new(new_lander_state.last_movement.a, point),
                    landed,
                    ..new_lander_state
                },
                FlightState::Landed(landing),
            ))
        } else {
            Ok((new_lander_state, FlightState::Flying))
        }
    }
}

pub struct Simulation<'a> {
    terrain: &'a Terrain,
    calculation: &'a LanderStateCalculation,
    lander: LanderState,
    flight_state: FlightState,
}

impl<'a> Simulation<'a> {
    pub fn new(
        terrain: &'a Terrain,
        calculation: &'a LanderStateCalculation,
        initial_lander_state: LanderState,
    ) -> Self {
        Self {
            terrain,
            calculation,
            lander: initial_lander_state,
            flight_state: FlightState::Flying,
        }
    }

    // no-op once the flight is over
    pub fn advance(&mut self, cmd: Command) -> Result<&FlightState, SimulationError> {
        if self.is_over() {
            trace!("Ignoring {cmd:?}, simulation is over");
            return Ok(&self.flight_state);
        }
        let (lander, flight_state) =
            self.calculation
                .calculate_new_lander_state(self.terrain, &self.lander, cmd)?;
        self.lander = lander;
        self.flight_state = flight_state;
        Ok(&self.flight_state)
    }

    pub fn lander(&self) -> &LanderState {
        &self.lander
    }

    pub fn flight_state(&self) -> &FlightState {
        &self.flight_state
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.flight_state, FlightState::Flying)
    }

    pub fn has_landed(&self) -> bool {
        self.lander.landed
    }

    pub fn distance_to_landing(&self) -> f64 {
        self.terrain
            .distance_from_landing_site(self.lander.position)
    }
}

pub struct Rollout<'a> {
    terrain: &'a Terrain,
    history: LanderHistory,
    outcome: Outcome,
}

impl<'a> Rollout<'a> {
    pub fn run(
        terrain: &'a Terrain,
        calculation: &LanderStateCalculation,
        initial_lander_state: LanderState,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<Self, SimulationError> {
        let mut history = LanderHistory::with_initial_state(initial_lander_state.clone());
        let mut simulation = Simulation::new(terrain, calculation, initial_lander_state);
        for cmd in commands {
            simulation.advance(cmd)?;
            history.append_lander_state(simulation.lander());
            if simulation.is_over() {
                break;
            }
        }
        Ok(Self {
            terrain,
            history,
            outcome: simulation.flight_state().into(),
        })
    }

    pub fn history(&self) -> &LanderHistory {
        &self.history
    }

    pub fn into_history(self) -> LanderHistory {
        self.history
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn has_landed(&self) -> bool {
        matches!(self.outcome, Outcome::Landed)
    }

    pub fn final_state(&self) -> &LanderState {
        self.history.last()
    }

    pub fn distance_to_landing(&self, position: Vec2) -> f64 {
        self.terrain.distance_from_landing_site(position)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LanderHistory {
    states: Vec<LanderState>,
}

impl LanderHistory {
    pub fn with_initial_state(state: LanderState) -> Self {
        Self {
            states: vec![state],
        }
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!(
                "{:>9}{:>9}{:>9}{:>9}{:>8}{:>7}{:>7}",
                "X", "Y", "HSPEED", "VSPEED", "FUEL", "ANGLE", "POWER"
            ),
            |out,
             LanderState {
                 position,
                 h_speed,
                 v_speed,
                 fuel,
                 rotation,
                 thrust,
                 ..
             }| {
                out + &format!(
                    "\n{:9.2}{:9.2}{h_speed:9.2}{v_speed:9.2}{fuel:8.0}{rotation:7}{thrust:7}",
                    position.x, position.y
                )
            },
        )
    }

    pub fn append_lander_state(&mut self, state: &LanderState) {
        self.states.push(state.clone());
    }

    pub fn iter_history(&self) -> impl Iterator<Item = &LanderState> + '_ {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[LanderState] {
        &self.states
    }

    pub fn first(&self) -> &LanderState {
        &self.states[0]
    }

    pub fn last(&self) -> &LanderState {
        &self.states[self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
