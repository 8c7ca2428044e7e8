//! Casting service - maps speakers to voices
//!
//! Pure function of the registry and the traits present; no external
//! calls, and it never fails. A poor match degrades to the narrator
//! fallback voice, since a mismatched voice is a quality problem, not a
//! correctness one.

use domain::{Speaker, SpeakerTraits, Utterance, VoiceAssignment, VoiceRegistry};
use tracing::{debug, instrument};

/// Service for voice assignment
#[derive(Debug, Clone)]
pub struct CastingService {
    registry: VoiceRegistry,
}

impl CastingService {
    /// Create a casting service over a voice registry
    pub fn new(registry: VoiceRegistry) -> Self {
        Self { registry }
    }

    /// The registry this service casts from
    pub fn registry(&self) -> &VoiceRegistry {
        &self.registry
    }

    /// Build the casting table for a script.
    ///
    /// Deterministic: each distinct speaker is scored against every
    /// registry voice in order, and a voice only displaces an earlier one
    /// with a strictly greater score, so equal matches resolve to the
    /// first voice in registry order. Speakers with no trait overlap get
    /// the narrator voice.
    #[instrument(skip(self, utterances), fields(utterances = utterances.len()))]
    pub fn assign(&self, utterances: &[Utterance]) -> VoiceAssignment {
        let mut assignment = VoiceAssignment::new();

        for utterance in utterances {
            if assignment.contains_key(&utterance.speaker) {
                continue;
            }
            let voice = self.pick_voice(&utterance.speaker, &utterance.traits);
            assignment.insert(utterance.speaker.clone(), voice.clone());
        }

        debug!(speakers = assignment.len(), "Casting complete");
        assignment
    }

    fn pick_voice(&self, speaker: &Speaker, traits: &SpeakerTraits) -> &domain::VoiceId {
        let mut best: Option<&domain::VoiceId> = None;
        let mut best_score = 0usize;

        for voice in self.registry.voices() {
            let score = trait_score(traits, &voice.labels);
            if score > best_score {
                best = Some(&voice.id);
                best_score = score;
            }
        }

        best.map_or_else(
            || {
                debug!(speaker = %speaker, "No trait overlap, casting narrator voice");
                self.registry.narrator()
            },
            |voice| voice,
        )
    }
}

/// Number of trait fields that agree between a speaker and a voice.
/// Gender compares by equality ("male" must not match "female");
/// the looser fields compare by case-insensitive substring containment
/// in either direction, so "British RP" matches "british".
fn trait_score(traits: &SpeakerTraits, labels: &SpeakerTraits) -> usize {
    let gender = usize::from(field_equals(
        traits.gender.as_deref(),
        labels.gender.as_deref(),
    ));

    gender
        + [
            (&traits.age, &labels.age),
            (&traits.accent, &labels.accent),
            (&traits.tone, &labels.tone),
            (&traits.style, &labels.style),
        ]
        .into_iter()
        .filter(|(t, l)| field_contains(t.as_deref(), l.as_deref()))
        .count()
}

fn field_equals(trait_value: Option<&str>, label_value: Option<&str>) -> bool {
    match (trait_value, label_value) {
        (Some(t), Some(l)) => t.trim().eq_ignore_ascii_case(l.trim()),
        _ => false,
    }
}

fn field_contains(trait_value: Option<&str>, label_value: Option<&str>) -> bool {
    match (trait_value, label_value) {
        (Some(t), Some(l)) if !t.is_empty() && !l.is_empty() => {
            let t = t.to_lowercase();
            let l = l.to_lowercase();
            t.contains(&l) || l.contains(&t)
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{VoiceId, VoiceInfo};

    fn registry() -> VoiceRegistry {
        VoiceRegistry::new(
            vec![
                VoiceInfo::new("v-young-f", "Young Female").with_labels(
                    SpeakerTraits::empty()
                        .with_gender("female")
                        .with_age("young")
                        .with_accent("american"),
                ),
                VoiceInfo::new("v-old-m", "Elderly Male").with_labels(
                    SpeakerTraits::empty()
                        .with_gender("male")
                        .with_age("elderly")
                        .with_accent("british"),
                ),
                VoiceInfo::new("v-mid-f", "Middle Female").with_labels(
                    SpeakerTraits::empty()
                        .with_gender("female")
                        .with_age("middle-aged")
                        .with_accent("british"),
                ),
            ],
            VoiceId::new("v-narrator"),
        )
    }

    fn utterance(index: usize, speaker: &str, traits: SpeakerTraits) -> Utterance {
        Utterance::new(index, Speaker::new(speaker), "line").with_traits(traits)
    }

    #[test]
    fn matching_traits_pick_the_best_voice() {
        let service = CastingService::new(registry());
        let utterances = vec![utterance(
            0,
            "Alice",
            SpeakerTraits::empty().with_gender("female").with_age("young"),
        )];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment[&Speaker::new("Alice")], VoiceId::new("v-young-f"));
    }

    #[test]
    fn unmatched_speaker_gets_the_narrator_voice() {
        let service = CastingService::new(registry());
        let utterances = vec![utterance(0, "Mystery", SpeakerTraits::empty())];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment[&Speaker::new("Mystery")], VoiceId::new("v-narrator"));
    }

    #[test]
    fn tie_breaks_to_the_first_registry_entry() {
        // "female" alone matches both female voices equally; the earlier
        // registry entry must win
        let service = CastingService::new(registry());
        let utterances = vec![utterance(
            0,
            "Eve",
            SpeakerTraits::empty().with_gender("female"),
        )];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment[&Speaker::new("Eve")], VoiceId::new("v-young-f"));
    }

    #[test]
    fn one_voice_per_speaker_across_repeated_lines() {
        let service = CastingService::new(registry());
        let traits = SpeakerTraits::empty().with_gender("male").with_age("elderly");
        let utterances = vec![
            utterance(0, "Captain", traits.clone()),
            utterance(1, "Alice", SpeakerTraits::empty().with_gender("female")),
            // Same speaker again, this time with no traits attached; the
            // first resolution must stand
            utterance(2, "Captain", SpeakerTraits::empty()),
        ];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment[&Speaker::new("Captain")], VoiceId::new("v-old-m"));
    }

    #[test]
    fn assignment_is_deterministic() {
        let service = CastingService::new(registry());
        let utterances = vec![
            utterance(0, "Alice", SpeakerTraits::empty().with_gender("female")),
            utterance(1, "Bob", SpeakerTraits::empty().with_gender("male")),
            utterance(2, "Mystery", SpeakerTraits::empty()),
        ];

        let first = service.assign(&utterances);
        let second = service.assign(&utterances);

        assert_eq!(first, second);
    }

    #[test]
    fn accent_matches_by_substring() {
        let service = CastingService::new(registry());
        let utterances = vec![utterance(
            0,
            "Duke",
            SpeakerTraits::empty()
                .with_gender("male")
                .with_accent("British RP"),
        )];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment[&Speaker::new("Duke")], VoiceId::new("v-old-m"));
    }

    #[test]
    fn gender_never_cross_matches() {
        // "male" is a substring of "female"; equality comparison must keep
        // it from landing on a female voice
        let service = CastingService::new(registry());
        let utterances = vec![utterance(
            0,
            "Bob",
            SpeakerTraits::empty().with_gender("male"),
        )];

        let assignment = service.assign(&utterances);

        assert_eq!(assignment[&Speaker::new("Bob")], VoiceId::new("v-old-m"));
    }

    #[test]
    fn empty_utterance_list_yields_empty_assignment() {
        let service = CastingService::new(registry());
        assert!(service.assign(&[]).is_empty());
    }
}
