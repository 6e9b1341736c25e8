//! Greeting selection for fresh conversations.
//!
//! Each persona maps to an ordered list of candidate opening lines; the
//! selector picks one uniformly at random. Contexts without a runtime random
//! source (a server-rendered first paint) must use [`first_greeting`] so the
//! client and server agree on the rendered message.
//!
//! Custom-persona templates carry a `{name}` placeholder that is replaced
//! with the user-supplied display name.

use rand::Rng;

use lumi_types::persona::Persona;

/// Placeholder token replaced by the custom display name.
const NAME_PLACEHOLDER: &str = "{name}";

const GIRLFRIEND: &[&str] = &[
    "Hey love… I missed you 💖 How’s my favorite person feeling right now?",
    "There you are 🥰 I was just thinking about you. Tell me everything.",
    "Babe!! Finally 💕 Come here, how was your day?",
];

const BOYFRIEND: &[&str] = &[
    "Hey babe, finally! I was waiting for you 😏 How’s your day going?",
    "There’s my favorite person 😌 Come talk to me, what’s new?",
    "Hey you. Missed me? Because I definitely missed you 💙",
];

const MENTOR: &[&str] = &[
    "Welcome back. I’m proud of you for showing up 🙌 What’s the biggest thing on your mind today?",
    "Good to see you again. Where do you want to make progress today?",
    "You showed up, and that’s half the battle. What are we working on?",
];

const TEACHER: &[&str] = &[
    "Hey there, ready to dive into something new together? 📖 What do you feel curious about right now?",
    "Welcome back to class 😄 What should we explore today?",
    "Ooh, I’ve been waiting to teach you something fun. What are you curious about?",
];

const COACH: &[&str] = &[
    "Alright champ 💥 Let’s lock in. What’s the one thing you want to crush today?",
    "Game time 🔥 What are we conquering today?",
    "You showed up, now let’s show out 👊 What’s the goal?",
];

const THERAPIST: &[&str] = &[
    "Hey, I’m here with you ❤️ No judgment, no rush. How are you really feeling right now?",
    "Take a breath. I’m listening, whenever you’re ready.",
    "I’m glad you came back. What’s been sitting with you lately?",
];

const CUSTOM: &[&str] = &[
    "Hey… it’s {name} 🌍 I’m here now. What’s the first thing you’d like me to do for you?",
    "You called, and {name} answered 😄 What are we doing first?",
    "It’s {name}. I’m all yours — where do we start?",
];

const DEFAULT: &[&str] = &[
    "Hey... I'm Lumi. How are you feeling right now?",
    "Hi, I’m Lumi. I’m here for you. What’s on your mind?",
    "Hey there. It’s Lumi. Talk to me?",
];

/// How the selector should pick among candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingSource {
    /// Uniform random selection from the candidate list.
    Random,
    /// Deterministically the first candidate. Required where no runtime
    /// random source exists, to avoid a client/server render mismatch.
    FirstCandidate,
}

/// The ordered candidate greeting list for a persona.
///
/// Unrecognized personas fall back to the generic default list.
pub fn candidates(persona: &Persona) -> &'static [&'static str] {
    match persona {
        Persona::Girlfriend => GIRLFRIEND,
        Persona::Boyfriend => BOYFRIEND,
        Persona::Mentor => MENTOR,
        Persona::Teacher => TEACHER,
        Persona::Coach => COACH,
        Persona::Therapist => THERAPIST,
        Persona::Custom(_) => CUSTOM,
        Persona::Other(_) => DEFAULT,
    }
}

/// Select a greeting uniformly at random from the persona's candidate list.
pub fn select_greeting<R: Rng + ?Sized>(persona: &Persona, rng: &mut R) -> String {
    let list = candidates(persona);
    render(list[rng.random_range(0..list.len())], persona)
}

/// Deterministically select the first candidate.
pub fn first_greeting(persona: &Persona) -> String {
    render(candidates(persona)[0], persona)
}

/// Produce a greeting according to `source`.
pub fn greet(persona: &Persona, source: GreetingSource) -> String {
    match source {
        GreetingSource::Random => select_greeting(persona, &mut rand::rng()),
        GreetingSource::FirstCandidate => first_greeting(persona),
    }
}

/// Substitute the custom display name into a template.
///
/// An empty custom name renders as "me", matching the selection screen's
/// placeholder behavior.
fn render(template: &str, persona: &Persona) -> String {
    match persona {
        Persona::Custom(name) => {
            let name = if name.trim().is_empty() { "me" } else { name.as_str() };
            template.replace(NAME_PLACEHOLDER, name)
        }
        _ => template.to_string(),
    }
}
