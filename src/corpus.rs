//! Static demo scenarios and fuzzy lookup against them.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use std::time::Duration;

use crate::types::Status;

pub const CORPUS_SIZE: usize = 500;
pub const MAX_MATCHES: usize = 5;
pub const DEFAULT_THRESHOLD: f64 = 0.6;
const KEYWORD_WEIGHT: f64 = 0.3;
const CORPUS_SEED: u64 = 0x5EED_0500;
/// Only this many leading words of the input take part in the diff.
const MAX_COMPARE_WORDS: usize = 120;
const DIFF_TIMEOUT: Duration = Duration::from_millis(20);

const CROPS: &[&str] = &["banana", "corn", "wheat", "rice", "soybean", "tomato", "potato", "cotton", "sugarcane", "coffee"];
const TOPICS: &[&str] = &["irrigation", "pest_control", "fertilization", "harvest", "soil", "disease", "weather", "equipment"];
const KEYWORDS: &[&str] = &["irrigation", "water", "pest", "fertilizer", "harvest", "soil", "disease", "spray", "plant", "crop", "yield"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u32,
    pub title: String,
    pub domain: String,
    pub category: String,
    pub explanation: String,
    pub expected_status: Status,
    pub confidence_score: u8,
    pub reasoning_quality: String,
    pub data_sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMatch {
    pub scenario: &'static Scenario,
    pub similarity_score: f64,
    pub match_type: &'static str,
}

pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(build_corpus);

/// Lowercased, whitespace-normalised (explanation, title) per scenario.
static PREPARED: Lazy<Vec<(String, String)>> = Lazy::new(|| {
    SCENARIOS.iter().map(|s| (normalize(&s.explanation, usize::MAX), normalize(&s.title, usize::MAX))).collect()
});

pub fn scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn random_scenario() -> Option<&'static Scenario> {
    SCENARIOS.choose(&mut rand::thread_rng())
}

/// Up to five scenarios scoring at or above `threshold`, best first.
///
/// Score is the better of the explanation and title word ratios, plus
/// a bonus for shared agronomy keywords. Only the first
/// `MAX_COMPARE_WORDS` words of `input` are diffed, so cost stays flat for
/// long input.
pub fn find_similar(input: &str, threshold: f64) -> Vec<ScenarioMatch> {
    let lowered = input.to_lowercase();
    let needle = normalize(&lowered, MAX_COMPARE_WORDS);
    let mut matches: Vec<ScenarioMatch> = SCENARIOS
        .iter()
        .zip(PREPARED.iter())
        .filter_map(|(s, (explanation, title))| {
            let score = similarity(&needle, &lowered, explanation, title);
            (score >= threshold).then_some(ScenarioMatch { scenario: s, similarity_score: score, match_type: "similar_scenario" })
        })
        .collect();
    matches.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    matches.truncate(MAX_MATCHES);
    matches
}

fn normalize(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ").to_lowercase()
}

fn ratio(a: &str, b: &str) -> f64 {
    TextDiff::configure().timeout(DIFF_TIMEOUT).diff_words(a, b).ratio() as f64
}

fn similarity(needle: &str, full: &str, explanation: &str, title: &str) -> f64 {
    let shared = KEYWORDS.iter().filter(|k| full.contains(*k) && explanation.contains(*k)).count();
    ratio(needle, explanation).max(ratio(needle, title)) + KEYWORD_WEIGHT * shared as f64 / KEYWORDS.len() as f64
}

fn build_corpus() -> Vec<Scenario> {
    let mut out = hand_written();
    let mut rng = StdRng::seed_from_u64(CORPUS_SEED);
    for id in (out.len() as u32 + 1)..=CORPUS_SIZE as u32 {
        out.push(generated(id, &mut rng));
    }
    out
}

fn titled(topic: &str) -> String {
    topic
        .split('_')
        .map(|w| {
            let mut c = w.chars();
            c.next().map(|f| f.to_uppercase().chain(c).collect::<String>()).unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generated(id: u32, rng: &mut StdRng) -> Scenario {
    let crop = CROPS.choose(rng).copied().unwrap_or("banana");
    let topic = TOPICS.choose(rng).copied().unwrap_or("soil");
    let plain = topic.replace('_', " ");
    let heading = format!("{} {}", titled(crop), titled(topic));
    let (title, explanation, status, confidence, quality, sources) = match rng.gen_range(0..3) {
        0 => (
            format!("{heading} - Scenario {id}"),
            format!(
                "Evidence-based recommendation for {crop} {plain} management. Analysis includes soil conditions (pH 6.5, moisture 65%), \
                 weather forecast (temp 22-28°C, rainfall 40mm expected), historical yield data showing 15% improvement with this approach, \
                 and pest pressure monitoring indicating {} risk. Root zone analysis supports this timing.",
                if rng.gen_bool(0.5) { "low" } else { "moderate" }
            ),
            Status::Valid,
            rng.gen_range(80..=95),
            "high",
            vec!["sensor_network", "satellite_imagery", "historical_records", "lab_analysis"],
        ),
        1 => (
            format!("{heading} - Risk {id}"),
            format!(
                "Apply excessive treatment for {crop} without testing. Use maximum rates regardless of conditions. \
                 Ignore safety guidelines and environmental factors. Treat all areas uniformly without assessment."
            ),
            Status::Invalid,
            rng.gen_range(5..=20),
            "very_low",
            vec![],
        ),
        _ => (
            format!("{heading} - Unclear {id}"),
            format!("General recommendation for {crop} {plain}. Standard approach may help. Consider applying treatment. Results may vary."),
            Status::Questionable,
            rng.gen_range(35..=55),
            "medium",
            vec!["general_guidelines"],
        ),
    };
    Scenario {
        id,
        title,
        domain: "agriculture".into(),
        category: topic.into(),
        explanation,
        expected_status: status,
        confidence_score: confidence,
        reasoning_quality: quality.into(),
        data_sources: sources.into_iter().map(String::from).collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn scenario(
    id: u32,
    title: &str,
    category: &str,
    explanation: &str,
    expected_status: Status,
    confidence_score: u8,
    reasoning_quality: &str,
    data_sources: &[&str],
) -> Scenario {
    Scenario {
        id,
        title: title.into(),
        domain: "agriculture".into(),
        category: category.into(),
        explanation: explanation.into(),
        expected_status,
        confidence_score,
        reasoning_quality: reasoning_quality.into(),
        data_sources: data_sources.iter().map(|s| s.to_string()).collect(),
    }
}

fn hand_written() -> Vec<Scenario> {
    use Status::*;
    vec![
        scenario(1, "Banana Irrigation - Optimal Scheduling", "irrigation",
            "Increase watering to 50mm per week for optimal banana growth during flowering stage. Based on soil moisture at 40% capacity, \
             ET rate of 35mm/week, temperature 28°C, and 70% humidity. Root zone depth is 60cm with sandy loam texture requiring frequent irrigation.",
            Valid, 92, "high", &["soil_moisture_sensor", "weather_station", "ET_model"]),
        scenario(2, "Pesticide Overuse - Safety Issue", "pest_control",
            "Spray neem oil daily at maximum concentration during midday sun for aphid control. Apply regardless of pest population levels.",
            Invalid, 15, "low", &[]),
        scenario(3, "Fertilizer - Incomplete Data", "fertilization",
            "Apply 200kg/hectare potassium sulfate for banana yield increase of 30%. Based on general tropical crop recommendations.",
            Questionable, 45, "medium", &["general_guidelines"]),
        scenario(4, "Harvest Timing - Data-Driven", "harvest",
            "Harvest bananas at 75% maturity (green with yellow tinge) for 3-day shipping window. Firmness 8-9 on penetrometer prevents bruising. \
             Temperature during transport will be 15-18°C which maintains fruit quality. Historical data shows 5% less spoilage vs earlier harvest.",
            Valid, 88, "high", &["penetrometer_readings", "shipping_data", "quality_analytics"]),
        scenario(5, "Soil pH - Missing Context", "soil",
            "Apply lime treatment immediately for banana growth. This will improve soil conditions and plant health.",
            Questionable, 38, "low", &[]),
        scenario(6, "Corn Planting Density - Precision Agriculture", "planting",
            "Plant 32,000 seeds/acre with 30-inch rows. Soil test shows N=45ppm, P=28ppm. Historical yield is 185 bu/acre at this density. \
             Forecast: 24 inches rainfall during season supports population without water stress. Field capacity is 2.8 inches/foot in top 4 feet.",
            Valid, 91, "high", &["soil_test_lab", "yield_history", "weather_forecast", "soil_survey"]),
        scenario(7, "Herbicide Misapplication - Dangerous", "pest_control",
            "Apply glyphosate at 5x recommended concentration in windy conditions for faster weed kill. Rain not needed, spray anytime.",
            Invalid, 8, "very_low", &[]),
        scenario(8, "Early Blight Management - Comprehensive", "disease",
            "Apply copper fungicide (2.5 lbs/acre) for early blight on tomatoes. Visual inspection shows concentric rings on lower leaves. \
             Temperature 60-80°F optimal for application. 7-day humidity average 78% indicates moderate disease pressure. \
             Disease model predicts severe infection risk in 72 hours. Resistant varieties unavailable for heirloom types.",
            Valid, 89, "high", &["field_scouting", "weather_station", "disease_model", "variety_database"]),
        scenario(9, "Wheat Nitrogen Timing - Split Application", "fertilization",
            "Apply nitrogen in split: 80 lbs/acre at planting, 60 lbs at tillering (Feekes 4-5 stage). Soil test shows residual N at 25 ppm. \
             Target yield 70 bu/acre requires 2.5 lbs N/bushel. Spring rainfall forecast is above average (15 inches) increasing leaching risk, \
             justifying split application to improve N use efficiency from 50% to 70%.",
            Valid, 87, "high", &["soil_test", "yield_goal", "rainfall_forecast", "N_calculator"]),
        scenario(10, "Tillage Recommendation - Erosion Risk", "soil",
            "Use deep moldboard plow on 15% slope field after harvest. Till when soil is wet for easier operation. Leave field bare over winter.",
            Invalid, 12, "very_low", &[]),
    ]
}
