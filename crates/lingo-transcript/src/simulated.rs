//! Simulated-content fallback.
//!
//! Guarantees the pipeline always has something to return. Content is a
//! generic practice paragraph picked at random and chunked into fixed-size
//! timed segments. Results are always marked non-authentic.

use lingo_models::{TranscriptSegment, VideoTranscriptResult, VideoId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Words per simulated segment.
pub const WORDS_PER_SEGMENT: usize = 5;
/// Duration of each simulated segment.
pub const SEGMENT_DURATION_MS: u64 = 3_000;

/// A fixed practice paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedTopic {
    pub title: &'static str,
    pub paragraph: &'static str,
}

const TOPICS: [SimulatedTopic; 4] = [
    SimulatedTopic {
        title: "Climate Change",
        paragraph: "Climate change is one of the most important challenges of our time. \
Rising global temperatures are melting glaciers and raising sea levels around the world. \
Scientists agree that reducing greenhouse gas emissions is essential to protect our planet. \
Many countries are investing in renewable energy such as solar and wind power. \
Every person can help by saving energy, using public transport, and reducing waste at home.",
    },
    SimulatedTopic {
        title: "Technology and Daily Life",
        paragraph: "Technology has changed the way we live, work, and communicate with each other. \
Smartphones allow us to stay connected with friends and family anywhere in the world. \
Artificial intelligence is helping doctors find diseases earlier and students learn faster. \
However, spending too much time in front of screens can affect our sleep and our health. \
It is important to find a healthy balance between our online and offline lives.",
    },
    SimulatedTopic {
        title: "Sustainable Living",
        paragraph: "Sustainable living means making choices that protect the environment for future generations. \
Simple habits like carrying a reusable bag and drinking from a refillable bottle make a difference. \
Buying local food reduces transport emissions and supports farmers in our community. \
Repairing old things instead of throwing them away saves money and resources. \
Small changes in our daily routines can add up to a big positive impact.",
    },
    SimulatedTopic {
        title: "Healthy Habits",
        paragraph: "Building healthy habits is easier when we start with small and realistic goals. \
Drinking enough water, eating fresh vegetables, and sleeping eight hours help our bodies recover. \
Regular exercise, even a short walk every day, improves our mood and our energy. \
Learning something new, like a language or a musical instrument, keeps our minds active. \
Being kind to ourselves on difficult days is also an important part of staying healthy.",
    },
];

/// Simulated transcript generator.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTranscriptGenerator {
    seed: Option<u64>,
}

impl SimulatedTranscriptGenerator {
    /// `seed` makes the topic choice reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// All available topics.
    pub fn topics() -> &'static [SimulatedTopic] {
        &TOPICS
    }

    /// Pick a topic uniformly at random.
    pub fn pick_topic(&self) -> &'static SimulatedTopic {
        let index = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed).random_range(0..TOPICS.len()),
            None => rand::rng().random_range(0..TOPICS.len()),
        };
        &TOPICS[index]
    }

    /// Produce a simulated result. Never fails.
    pub fn generate(&self, video_id: &VideoId) -> VideoTranscriptResult {
        let topic = self.pick_topic();
        let segments = chunk_segments(topic.paragraph);
        VideoTranscriptResult::simulated(
            video_id.clone(),
            topic.title,
            topic.paragraph.to_string(),
            segments,
        )
    }
}

/// Split text into fixed-size word chunks with fixed timing.
pub fn chunk_segments(text: &str) -> Vec<TranscriptSegment> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(WORDS_PER_SEGMENT)
        .enumerate()
        .map(|(index, chunk)| {
            TranscriptSegment::new(
                chunk.join(" "),
                SEGMENT_DURATION_MS,
                index as u64 * SEGMENT_DURATION_MS,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lingo_models::segment::join_segment_text;

    use super::*;

    fn video() -> VideoId {
        VideoId::parse("anything").unwrap()
    }

    #[test]
    fn test_topics_are_substantial() {
        assert!(SimulatedTranscriptGenerator::topics().len() >= 3);
        for topic in SimulatedTranscriptGenerator::topics() {
            assert!(topic.paragraph.len() > 300, "{}", topic.title);
        }
    }

    #[test]
    fn test_generate_is_simulated_and_populated() {
        let result = SimulatedTranscriptGenerator::default().generate(&video());

        assert!(!result.is_authentic);
        assert!(!result.transcript.is_empty());
        assert!(!result.segments.is_empty());
        assert!(SimulatedTranscriptGenerator::topics()
            .iter()
            .any(|t| t.paragraph == result.transcript));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = SimulatedTranscriptGenerator::new(Some(42)).generate(&video());
        let second = SimulatedTranscriptGenerator::new(Some(42)).generate(&video());
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_segments_layout() {
        let segments = chunk_segments("one two three four five six seven");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], TranscriptSegment::new("one two three four five", 3_000, 0));
        assert_eq!(segments[1], TranscriptSegment::new("six seven", 3_000, 3_000));
    }

    #[test]
    fn test_segments_reconstruct_paragraph() {
        for topic in SimulatedTranscriptGenerator::topics() {
            let segments = chunk_segments(topic.paragraph);
            assert_eq!(join_segment_text(&segments), topic.paragraph);
            assert!(segments
                .windows(2)
                .all(|w| w[1].offset_ms == w[0].offset_ms + SEGMENT_DURATION_MS));
        }
    }
}
