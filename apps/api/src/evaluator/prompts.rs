// All LLM prompt constants for the evaluator module.

/// System prompt for question generation — enforces JSON-only output.
pub const QUESTION_GEN_SYSTEM: &str = "You are an expert technical interviewer. \
    You MUST respond with valid JSON only — a JSON array of strings. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Question generation prompt template. Replace `{jd_text}` before sending.
pub const QUESTION_GEN_TEMPLATE: &str = r#"From the job description below, generate 5-7 concise, role-relevant phone interview questions. Avoid trivia; test applied skill and communication. Each question must be answerable in one or two spoken minutes.

Return a JSON array of question strings, nothing else:
["First question?", "Second question?"]

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for answer scoring and the final recommendation.
pub const SCORING_SYSTEM: &str = "You are a fair interview evaluator. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Single-answer scoring prompt. Replace `{question}` and `{transcript}`.
pub const SCORE_ANSWER_TEMPLATE: &str = r#"Score the candidate's answer from 1-5 (5 = excellent) considering relevance, clarity, correctness, and depth.

Return a JSON object:
{"score": 4, "rationale": "One or two sentences explaining the score."}

QUESTION:
{question}

ANSWER TRANSCRIPT:
{transcript}"#;

/// Final recommendation prompt. Replace `{answers_json}`.
pub const RECOMMEND_TEMPLATE: &str = r#"Given the full set of scored interview answers below, give a single hiring recommendation.

Return a JSON object whose "recommendation" is EXACTLY one of:
"Strong yes", "Yes", "Leaning yes", "Neutral", "Leaning no", "No"

{"recommendation": "Yes"}

SCORED ANSWERS:
{answers_json}"#;
