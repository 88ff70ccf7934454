//! Coaching personas.
//!
//! Each persona renders the same [`MessageContext`] in its own voice.
//! Bodies are plain text with emoji; the templates interpolate streak
//! numbers, rates, and the bullet lists produced by risk assessment.
//! Formatting quirks are deliberate: a persona that leaves an empty line
//! where an optional line would go keeps its spacing stable across
//! variants.

use serde::{Deserialize, Serialize};

use crate::insight::PatternKind;

use super::MessageContext;

/// Voice used for coaching messages.
///
/// Serialized in kebab-case ("coach-blaze", "the-monk") to match the
/// names users put in their configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    /// Data-first and neutral; the default.
    #[default]
    Flex,
    /// High-energy hype.
    CoachBlaze,
    /// Gentle and reflective.
    Luna,
    /// Warm and encouraging.
    Ava,
    /// Terse status reports.
    Max,
    /// Mindful flow.
    Sofi,
    /// Contemplative.
    TheMonk,
}

impl Persona {
    /// Renders the context in this persona's voice.
    pub fn render(&self, context: &MessageContext) -> String {
        match self {
            Persona::Flex => flex(context),
            Persona::CoachBlaze => coach_blaze(context),
            Persona::Luna => luna(context),
            Persona::Ava => ava(context),
            Persona::Max => max(context),
            Persona::Sofi => sofi(context),
            Persona::TheMonk => the_monk(context),
        }
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Neutral one-liner describing a week-over-week trend delta.
pub(crate) fn trend_message(trend: i32) -> &'static str {
    if trend > 20 {
        "Significant improvement detected"
    } else if trend > 10 {
        "Positive momentum building"
    } else if trend > 0 {
        "Steady progress maintained"
    } else if trend == 0 {
        "Consistent performance"
    } else if trend > -10 {
        "Minor fluctuation observed"
    } else {
        "Declining trend—intervention may help"
    }
}

/// Structured context block appended to insight messages.
pub(crate) fn insight_context(kind: &PatternKind) -> String {
    match kind {
        PatternKind::DayPattern { best, worst } => format!(
            "Best: {} ({}%)\nWorst: {} ({}%)",
            best.day, best.rate, worst.day, worst.rate
        ),
        PatternKind::Improvement {
            current_rate,
            prior_rate,
            delta,
        } => format!(
            "Last week: {}%\nThis week: {}%\nImprovement: +{}%",
            prior_rate.round(),
            current_rate.round(),
            delta.round()
        ),
        PatternKind::Decline {
            current_rate,
            prior_rate,
            delta,
        } => format!(
            "Last week: {}%\nThis week: {}%\nChange: -{}%",
            prior_rate.round(),
            current_rate.round(),
            delta.round()
        ),
        PatternKind::Consistency { rate } => format!(
            "Completion rate: {}%\nThis is exceptional performance!",
            rate.round()
        ),
    }
}

fn flex(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            quality,
        } => {
            let first_suffix = if *is_first { "—your longest streak yet" } else { "" };
            let record_line = if *is_first { "- New personal record" } else { "" };
            let quality = quality.as_str();
            let quality_upper = quality.to_uppercase();
            let next = streak + 7;
            format!(
"🎉 Milestone Alert: {streak}-Day Streak

You've maintained {habit_name} for {streak} consecutive days{first_suffix}.

Data shows {quality} quality (forgiveness not used). The compound effect is beginning.

📊 Your Progress:
- Current streak: {streak} days
- Quality: {quality_upper}
{record_line}

Next target: {next} days. One week at a time."
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let actions = bullets(recommendations);
            format!(
"⚠️ Streak Alert: {habit_name}

Risk analysis indicates elevated probability of streak disruption:

{factors}

Current streak: {streak} days

Recommended actions:
{actions}

Your data shows clear patterns—let's use them strategically."
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            completion_rate,
            streak,
            trend,
        } => {
            let trend_line = if *trend > 0 {
                format!("+{trend}% vs last week")
            } else {
                format!("{trend}% vs last week")
            };
            let observation = trend_message(*trend);
            format!(
"📊 Weekly Progress Report: {habit_name}

This week: {days_completed}/7 days ({completion_rate}%)
Current streak: {streak} days
Trend: {trend_line}

Data-driven observation: {observation}

See attached visualizations for detailed analysis."
            )
        }
        MessageContext::Insight {
            habit_name,
            message,
            kind,
        } => {
            let detail = insight_context(kind);
            format!(
"🔍 Pattern Detection: {habit_name}

Analysis reveals: {message}

{detail}

This data point may inform optimization strategies. Worth exploring?"
            )
        }
    }
}

fn coach_blaze(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first {
                "🏆 NEW PERSONAL RECORD! LEGENDARY! 🏆"
            } else {
                ""
            };
            let next = streak + 7;
            format!(
"🔥 BOOM! {streak}-DAY STREAK! 🔥

You're absolutely CRUSHING {habit_name}! That's {streak} STRAIGHT DAYS of showing up like a CHAMPION!

{record_line}

You're building UNSTOPPABLE momentum! The old you couldn't even IMAGINE this level of consistency!

Keep that FIRE burning! Next stop: {next} days! LET'S GOOOOO! 💪💪💪"
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let plan = bullets(recommendations);
            format!(
"⚠️ HEADS UP, WARRIOR!

I've been watching your {habit_name} data, and we need to TALK!

🚨 Risk factors:
{factors}

You're on a {streak}-day streak! We're NOT letting this die!

🛡️ BATTLE PLAN:
{plan}

You got this! LOCK IN and EXECUTE! 💪"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            completion_rate,
            streak,
            trend,
        } => {
            let trend_line = if *trend > 0 {
                format!("UP {trend}% from last week! MOMENTUM!")
            } else {
                format!("Down {}% but still STRONG!", trend.abs())
            };
            format!(
"📊 WEEKLY BEAST MODE REPORT!

This week you DOMINATED {habit_name}!
✅ {days_completed}/7 days - That's {completion_rate}% EXECUTION!
🔥 {streak}-day streak and CLIMBING!

{trend_line}

Keep GRINDING, champion! 💪"
            )
        }
        MessageContext::Insight {
            habit_name,
            message,
            kind,
        } => {
            let detail = insight_context(kind);
            format!(
"🔍 PATTERN SPOTTED!

Check this out for {habit_name}: {message}

{detail}

This is GOLD! Use this intel to LEVEL UP! 💪"
            )
        }
    }
}

fn luna(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first {
                "This is the furthest you've ever walked this path—how does that feel?"
            } else {
                ""
            };
            format!(
"🌙 A Beautiful Milestone

Your {streak}-day journey with {habit_name} is unfolding beautifully.

{record_line}

Each day you choose to show up is an act of self-compassion. The consistency speaks to something deeper within you.

💭 Reflection: What has made these {streak} days possible?

Hold this moment gently. You're doing meaningful work."
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let possibilities = bullets(recommendations);
            format!(
"💭 A Gentle Check-In

I notice some patterns with {habit_name} that might be worth exploring together:

{factors}

Your {streak}-day streak holds value. Let's protect it with compassion, not pressure.

Some possibilities to consider:
{possibilities}

What feels right for you?"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            completion_rate,
            streak,
            trend,
        } => {
            let trend_line = if *trend > 0 {
                format!("Something shifted this week (+{trend}%). What changed?")
            } else {
                "Progress isn't always linear. What did you learn?".to_string()
            };
            format!(
"🌙 Your Weekly Reflection

This week, you showed up for {habit_name} {days_completed} out of 7 days—a {completion_rate}% expression of your commitment.

Your {streak}-day streak continues to grow.

{trend_line}

Let's hold space for what this journey means to you."
            )
        }
        MessageContext::Insight {
            habit_name,
            message,
            kind,
        } => {
            let detail = insight_context(kind);
            format!(
"🌙 A Pattern Emerges

I noticed something about {habit_name}: {message}

{detail}

What does this pattern reveal about your journey?"
            )
        }
    }
}

fn ava(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first {
                "This is your longest streak ever—amazing!"
            } else {
                ""
            };
            let next = streak + 7;
            format!(
"✨ {streak} Days Strong!

Look at you go with {habit_name}! {streak} days of consistent effort!

{record_line}

Every day you showed up counts. You're proving to yourself that you can do this.

Next milestone: {next} days. You've got this! ✨"
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let suggestions = bullets(recommendations);
            format!(
"Hey, quick heads up about {habit_name}:

{factors}

You're at {streak} days—let's keep that momentum!

Try these:
{suggestions}"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            completion_rate,
            streak,
            trend,
        } => {
            let trend_line = if *trend > 0 {
                format!("Improved {trend}% from last week!")
            } else {
                format!("Trend: {trend}%")
            };
            let observation = trend_message(*trend);
            format!(
"Week in Review: {habit_name}

{days_completed}/7 days ({completion_rate}%) ✓
Current streak: {streak} days
{trend_line}

{observation}"
            )
        }
        MessageContext::Insight { message, kind, .. } => {
            let detail = insight_context(kind);
            format!("Interesting pattern: {message}\n\n{detail}")
        }
    }
}

fn max(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first {
                "New personal record achieved"
            } else {
                "Maintaining momentum"
            };
            let next = streak + 7;
            format!(
"🎯 {streak}-Day Milestone Hit

{habit_name}: {streak} consecutive completions
{record_line}

Status: On track
Next checkpoint: Day {next}"
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let actions = bullets(recommendations);
            format!(
"⚠️ Risk Alert: {habit_name}

Detected patterns:
{factors}

Current streak: {streak} days at risk

Action items:
{actions}"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            completion_rate,
            streak,
            trend,
        } => {
            let sign = if *trend > 0 { "+" } else { "" };
            let analysis = trend_message(*trend);
            format!(
"Weekly Stats: {habit_name}

Performance: {days_completed}/7 ({completion_rate}%)
Streak: {streak} days
Week-over-week: {sign}{trend}%

Analysis: {analysis}"
            )
        }
        MessageContext::Insight { message, kind, .. } => {
            let detail = insight_context(kind);
            format!("Data Point: {message}\n\n{detail}")
        }
    }
}

fn sofi(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first {
                "This is your deepest practice yet."
            } else {
                "The river continues."
            };
            format!(
"🌸 {streak} Days of Presence

Breathe.

{streak} moments of choosing {habit_name}. Not forcing. Simply flowing.

{record_line}

Notice how natural it feels now. This is who you are becoming.

One breath. One day. Continue."
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let considerations = bullets(recommendations);
            format!(
"🌸 A Gentle Pause

Notice: {habit_name}

Patterns emerging:
{factors}

Your {streak}-day practice holds value.

Consider:
{considerations}

Less effort. More awareness. What feels natural?"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            streak,
            trend,
            ..
        } => {
            let trend_line = if *trend > 0 {
                format!("The practice deepens (+{trend}%). Like water carving stone.")
            } else {
                "Ebbs and flows. All part of the rhythm.".to_string()
            };
            format!(
"🌸 This Week's Flow

{habit_name}: {days_completed} of 7 days honored
{streak} days of continuous presence

{trend_line}

Breathe. Notice. Continue."
            )
        }
        MessageContext::Insight { message, kind, .. } => {
            let detail = insight_context(kind);
            format!(
"🌸 Pattern Recognition

Observe: {message}

{detail}

What does this pattern reveal about your natural rhythm?"
            )
        }
    }
}

fn the_monk(context: &MessageContext) -> String {
    match context {
        MessageContext::Milestone {
            habit_name,
            streak,
            is_first,
            ..
        } => {
            let record_line = if *is_first { "This is your deepest journey yet." } else { "" };
            let next = streak + 7;
            format!(
"🕉️ {streak} Days of Practice

For {streak} days, you have walked the path of {habit_name}.

{record_line}

Each day is but a single step. The path reveals itself to those who persist.

Continue with mindfulness. The next {next} days await."
            )
        }
        MessageContext::Risk {
            habit_name,
            streak,
            risk_factors,
            recommendations,
        } => {
            let factors = bullets(risk_factors);
            let approaches = bullets(recommendations);
            format!(
"🕉️ A Moment of Awareness

Observe these patterns in your practice of {habit_name}:

{factors}

Your {streak}-day practice continues.

Consider these approaches:
{approaches}

What does your inner wisdom say?"
            )
        }
        MessageContext::Weekly {
            habit_name,
            days_completed,
            streak,
            trend,
            ..
        } => {
            let sign = if *trend > 0 { "+" } else { "" };
            let trend_line = if *trend > 0 {
                "The path deepens."
            } else {
                "All paths have their seasons."
            };
            format!(
"🕉️ This Week's Practice

{habit_name}: {days_completed} of 7 days walked
{streak} days of continuous practice
Change: {sign}{trend}%

{trend_line}

Continue with presence."
            )
        }
        MessageContext::Insight { message, kind, .. } => {
            let detail = insight_context(kind);
            format!(
"🕉️ The Pattern Speaks

Observe: {message}

{detail}

What wisdom does this reveal?"
            )
        }
    }
}
