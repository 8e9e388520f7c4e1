//! Badge and challenge rules: threshold checks over trainer counters.

use serde::{Deserialize, Serialize};

use crate::types::TrainerProfile;

/// Points paid out with each newly awarded badge.
pub const BADGE_AWARD_POINTS: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct BadgeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: &'static str,
}

pub const BADGES: [BadgeDef; 5] = [
    BadgeDef {
        id: "first_discovery",
        name: "First Discovery",
        description: "Discover your first Pokemon",
        icon: "🌟",
        requirement: "Discover 1 Pokemon",
    },
    BadgeDef {
        id: "explorer",
        name: "Explorer",
        description: "Discover 10 Pokemon",
        icon: "🗺️",
        requirement: "Discover 10 Pokemon",
    },
    BadgeDef {
        id: "master",
        name: "Master Explorer",
        description: "Discover 50 Pokemon",
        icon: "🏆",
        requirement: "Discover 50 Pokemon",
    },
    BadgeDef {
        id: "ar_enthusiast",
        name: "AR Enthusiast",
        description: "Capture 5 Pokemon in AR",
        icon: "📷",
        requirement: "Capture 5 Pokemon in AR",
    },
    BadgeDef {
        id: "social",
        name: "Social Butterfly",
        description: "Share 10 discoveries",
        icon: "💬",
        requirement: "Share 10 discoveries",
    },
];

/// Award every badge whose threshold the profile now meets.
///
/// Already-held badges are skipped, so repeated passes are idempotent. Each
/// new badge pays [`BADGE_AWARD_POINTS`]. Returns the ids awarded this pass;
/// the caller persists the profile.
pub fn check_and_award(profile: &mut TrainerProfile) -> Vec<&'static str> {
    let discovered = profile.discovered_pokemon.len();
    let mut new_badges = Vec::new();

    for badge in &BADGES {
        if profile.badges.iter().any(|b| b == badge.id) {
            continue;
        }

        let earned = match badge.id {
            "first_discovery" => discovered >= 1,
            "explorer" => discovered >= 10,
            "master" => discovered >= 50,
            // AR captures are not tracked separately yet; discoveries stand in.
            "ar_enthusiast" => discovered >= 5,
            // Needs share tracking before it can be awarded.
            "social" => false,
            _ => false,
        };

        if earned {
            profile.badges.push(badge.id.to_string());
            profile.points += BADGE_AWARD_POINTS;
            new_badges.push(badge.id);
        }
    }

    new_badges
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Daily,
    Weekly,
    Special,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequirement {
    pub kind: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeReward {
    pub points: u32,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub requirement: ChallengeRequirement,
    pub reward: ChallengeReward,
    pub completed: bool,
}

/// The rotating daily challenge set.
pub fn daily_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "daily_discover".into(),
            title: "Daily Discovery".into(),
            description: "Discover 3 Pokemon today".into(),
            kind: ChallengeKind::Daily,
            requirement: ChallengeRequirement {
                kind: "discover".into(),
                count: 3,
            },
            reward: ChallengeReward {
                points: 20,
                badge: None,
            },
            completed: false,
        },
        Challenge {
            id: "fire_type_hunt".into(),
            title: "Fire Type Hunter".into(),
            description: "Find a fire-type Pokemon today".into(),
            kind: ChallengeKind::Daily,
            requirement: ChallengeRequirement {
                kind: "fire".into(),
                count: 1,
            },
            reward: ChallengeReward {
                points: 30,
                badge: Some("fire_hunter".into()),
            },
            completed: false,
        },
        Challenge {
            id: "water_type_hunt".into(),
            title: "Water Type Hunter".into(),
            description: "Find a water-type Pokemon today".into(),
            kind: ChallengeKind::Daily,
            requirement: ChallengeRequirement {
                kind: "water".into(),
                count: 1,
            },
            reward: ChallengeReward {
                points: 30,
                badge: Some("water_hunter".into()),
            },
            completed: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_discoveries(count: u32) -> TrainerProfile {
        let mut profile = TrainerProfile::new("trainer-1");
        profile.discovered_pokemon = (1..=count).collect();
        profile
    }

    #[test]
    fn empty_profile_earns_nothing() {
        let mut profile = profile_with_discoveries(0);
        assert!(check_and_award(&mut profile).is_empty());
        assert_eq!(profile.points, 0);
    }

    #[test]
    fn fifty_discoveries_earn_all_discovery_badges() {
        let mut profile = profile_with_discoveries(50);
        let awarded = check_and_award(&mut profile);

        assert_eq!(
            awarded,
            vec!["first_discovery", "explorer", "master", "ar_enthusiast"]
        );
        assert_eq!(profile.points, 4 * BADGE_AWARD_POINTS);
        // Social needs share tracking and is never auto-awarded.
        assert!(!profile.badges.iter().any(|b| b == "social"));
    }

    #[test]
    fn awarding_is_idempotent() {
        let mut profile = profile_with_discoveries(10);
        let first = check_and_award(&mut profile);
        assert_eq!(first, vec!["first_discovery", "explorer", "ar_enthusiast"]);

        let second = check_and_award(&mut profile);
        assert!(second.is_empty());
        assert_eq!(profile.points, 3 * BADGE_AWARD_POINTS);
    }

    #[test]
    fn thresholds_are_crossed_incrementally() {
        let mut profile = profile_with_discoveries(1);
        assert_eq!(check_and_award(&mut profile), vec!["first_discovery"]);

        profile.discovered_pokemon = (1..=10).collect();
        assert_eq!(
            check_and_award(&mut profile),
            vec!["explorer", "ar_enthusiast"]
        );
    }

    #[test]
    fn daily_challenges_are_well_formed() {
        let challenges = daily_challenges();
        assert_eq!(challenges.len(), 3);
        for challenge in &challenges {
            assert_eq!(challenge.kind, ChallengeKind::Daily);
            assert!(challenge.reward.points > 0);
            assert!(!challenge.completed);
        }
    }
}
