use log::{debug, trace};

use crate::model::Skill;
use super::rules::Rule;
use super::types::Flotilla;

/// One crew's loss or gradient for the rule being optimized
#[derive(Debug, Clone)]
struct Score {
    value: u32,
    crew: String,
    boat: usize,
}

/// Greedy swap optimizer over a distributed flotilla.
///
/// Crews are swapped between boats one rule at a time in priority order.
/// A swap is only taken when it leaves the two crews involved, and the two
/// boats' rosters, no worse off under the current rule and every rule above
/// it. The crew brought in to relieve a violation is locked afterwards, so
/// each rule terminates.
#[derive(Debug, Clone)]
pub struct Optimizer {
    flotilla: Flotilla,
    unlocked: Vec<String>,
}

impl Optimizer {
    pub fn new(flotilla: Flotilla) -> Self {
        let mut unlocked = flotilla.crew_keys();

        // A high-skill crew already helping an assistance boat stays put
        for crewed in &flotilla.crewed_boats {
            if !crewed.boat.assistance {
                continue;
            }
            if let Some(helper) = crewed.crews.iter().find(|c| c.skill == Skill::MAX) {
                debug!("locking {} aboard assistance boat {}", helper.key, crewed.boat.key);
                unlocked.retain(|key| *key != helper.key);
            }
        }

        Optimizer { flotilla, unlocked }
    }

    pub fn flotilla(&self) -> &Flotilla {
        &self.flotilla
    }

    pub fn is_locked(&self, crew_key: &str) -> bool {
        !self.unlocked.iter().any(|key| key == crew_key)
    }

    pub fn total_loss(&self, rule: Rule) -> u32 {
        self.flotilla.total_loss(rule)
    }

    /// Runs every rule in priority order and hands back the refined flotilla
    pub fn run(mut self) -> Flotilla {
        for rule in Rule::PRIORITY {
            self.optimize(rule);
        }
        self.flotilla
    }

    /// Swaps crews until the rule can't be improved. Returns the swap count.
    pub fn optimize(&mut self, rule: Rule) -> usize {
        let mut swaps = 0;

        while self.unlocked.len() > 1 {
            let (losses, gradients) = self.scores(rule);

            trace!("{} losses: {:?}", rule, table(&losses));
            trace!("{} gradients: {:?}", rule, table(&gradients));

            if losses[0].value == 0 || gradients[0].value == 0 {
                break;
            }

            let worst = &losses[0];
            let partner = gradients
                .iter()
                .filter(|candidate| candidate.boat != worst.boat)
                .find(|candidate| self.swap_is_safe(rule, worst, candidate));

            let Some(partner) = partner else {
                trace!("{}: no safe swap for {}", rule, worst.crew);
                break;
            };

            debug!(
                "{}: swapping {} ({} -> {}) with {} ({} -> {})",
                rule,
                worst.crew,
                self.flotilla.crewed_boats[worst.boat].boat.key,
                self.flotilla.crewed_boats[partner.boat].boat.key,
                partner.crew,
                self.flotilla.crewed_boats[partner.boat].boat.key,
                self.flotilla.crewed_boats[worst.boat].boat.key,
            );

            self.swap(worst, partner);
            self.unlocked.retain(|key| *key != partner.crew);
            swaps += 1;
        }

        swaps
    }

    /// Loss and gradient of every unlocked crew, each sorted highest first
    fn scores(&self, rule: Rule) -> (Vec<Score>, Vec<Score>) {
        let event_id = &self.flotilla.event_id;
        let mut losses = Vec::with_capacity(self.unlocked.len());
        let mut gradients = Vec::with_capacity(self.unlocked.len());

        for key in &self.unlocked {
            let boat = self
                .flotilla
                .boat_of(key)
                .unwrap_or_else(|| panic!("crew {} is not aboard any boat", key));
            let crewed = &self.flotilla.crewed_boats[boat];
            let crew = crewed.crew(key);

            losses.push(Score {
                value: rule.loss(crew, crewed, event_id),
                crew: key.clone(),
                boat,
            });
            gradients.push(Score {
                value: rule.gradient(crew),
                crew: key.clone(),
                boat,
            });
        }

        // Stable, so ties keep roster order
        losses.sort_by(|a, b| b.value.cmp(&a.value));
        gradients.sort_by(|a, b| b.value.cmp(&a.value));
        (losses, gradients)
    }

    /// Simulates swapping `a` and `b` and checks nothing gets worse for this
    /// rule or any rule above it
    fn swap_is_safe(&self, rule: Rule, a: &Score, b: &Score) -> bool {
        let event_id = &self.flotilla.event_id;
        let x = &self.flotilla.crewed_boats[a.boat];
        let y = &self.flotilla.crewed_boats[b.boat];
        let crew_a = x.crew(&a.crew);
        let crew_b = y.crew(&b.crew);

        let mut x_after = x.clone();
        let mut y_after = y.clone();
        x_after.replace(&a.crew, crew_b.clone());
        y_after.replace(&b.crew, crew_a.clone());

        rule.and_above().iter().all(|r| {
            let a_ok = r.loss(crew_a, &y_after, event_id) <= r.loss(crew_a, x, event_id);
            let b_ok = r.loss(crew_b, &x_after, event_id) <= r.loss(crew_b, y, event_id);
            let before = x.roster_loss(*r, event_id) + y.roster_loss(*r, event_id);
            let after = x_after.roster_loss(*r, event_id) + y_after.roster_loss(*r, event_id);
            a_ok && b_ok && after <= before
        })
    }

    fn swap(&mut self, a: &Score, b: &Score) {
        let crew_a = self.flotilla.crewed_boats[a.boat].crew(&a.crew).clone();
        let crew_b = self.flotilla.crewed_boats[b.boat].replace(&b.crew, crew_a);
        self.flotilla.crewed_boats[a.boat].replace(&a.crew, crew_b);
    }
}

fn table(scores: &[Score]) -> Vec<(&str, u32)> {
    scores.iter().map(|s| (s.crew.as_str(), s.value)).collect()
}

/// Refines crew placement across an already distributed flotilla. The boats
/// and the set of crews are unchanged, only who sails where.
pub fn assign(flotilla: Flotilla) -> Flotilla {
    Optimizer::new(flotilla).run()
}
