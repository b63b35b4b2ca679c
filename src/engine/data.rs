//! Authored reply content: the curated topic table, joke material, opener
//! and template families. All declarative; the generator picks from these
//! with its RNG.

use crate::nlp::Sentiment;

// ── Curated topics ───────────────────────────────────────────────────────────

/// Hand-written descriptions for topics the bot holds strong opinions on.
pub(crate) const TOPIC_RESPONSES: &[(&str, &[&str])] = &[
    (
        "vr",
        &[
            "VR headsets are absolutely fascinating! They create immersive virtual worlds by tracking your head movements and displaying stereoscopic images. Modern VR headsets like the Meta Quest, PlayStation VR, and Valve Index offer incredible experiences - from exploring virtual worlds to playing immersive games. What interests you most about VR technology? Are you thinking about getting one, or curious about how they work?",
            "Virtual Reality is such an exciting field! VR headsets transport you to completely different worlds using advanced display technology, motion tracking, and spatial audio. They're used for gaming, education, training simulations, and even therapy. The technology has come so far - we now have wireless headsets with hand tracking! What aspect of VR fascinates you most?",
            "VR headsets are incredible pieces of technology! They use multiple sensors, high-resolution displays, and precise tracking to create the illusion that you're somewhere else entirely. From exploring ancient civilizations to practicing surgery, VR opens up amazing possibilities. Have you tried VR before, or are you curious about what it's like?",
        ],
    ),
    (
        "headset",
        &[
            "Headsets come in so many varieties! There are VR headsets for virtual reality, gaming headsets for immersive audio, and professional headsets for work calls. Each type is engineered for specific purposes - VR headsets focus on visual immersion and tracking, while gaming headsets prioritize audio quality and comfort for long sessions. What type of headset are you interested in?",
            "The world of headsets is diverse and exciting! From lightweight wireless earbuds to heavy-duty professional broadcasting headsets, each serves different needs. Gaming headsets often feature surround sound and noise cancellation, while VR headsets include motion sensors and high-resolution displays. Are you looking for recommendations, or curious about how they work?",
        ],
    ),
    (
        "pepsi",
        &[
            "Pepsi has quite a history! It was created in 1893 by pharmacist Caleb Bradham. Interesting how it became Coca-Cola's main rival.",
            "The Cola Wars between Pepsi and Coke were fascinating! Remember the Pepsi Challenge campaigns?",
            "Pepsi's marketing has always been bold - from the 'Pepsi Generation' to celebrity endorsements. What do you think of their approach?",
            "Did you know Pepsi once briefly owned a fleet of Soviet warships? Wild business deals in the 80s!",
        ],
    ),
    (
        "coke",
        &[
            "Coca-Cola is the classic! That secret formula has been kept under wraps for over a century.",
            "The polar bear ads and 'Share a Coke' campaigns were genius marketing moves.",
            "Coke's global reach is incredible - it's available in almost every country on Earth.",
        ],
    ),
    (
        "drinks",
        &[
            "There are so many interesting beverages out there! From artisanal sodas to energy drinks to traditional teas.",
            "The beverage industry is always innovating - have you tried any unique flavors lately?",
            "I find it fascinating how different cultures have their own signature drinks.",
        ],
    ),
    (
        "k-on",
        &[
            "K-On! is such a delightful slice-of-life anime! It follows five high school girls in their light music club - Yui, Mio, Ritsu, Tsumugi, and Azusa. The show perfectly captures the joy of friendship and music-making.",
        ],
    ),
    (
        "bocchi",
        &[
            "Bocchi the Rock! is absolutely fantastic! It tells the story of Hitori Gotoh, a socially anxious guitarist who joins a band. The series brilliantly portrays social anxiety while celebrating the power of music and friendship.",
        ],
    ),
    (
        "anime",
        &[
            "Anime is such a rich medium! From epic adventures like Attack on Titan to heartwarming stories like Your Name, there's something for everyone. What genres do you enjoy most?",
        ],
    ),
    (
        "music",
        &[
            "Music truly is magical! It can instantly transport you to different emotions and memories. Whether it's a catchy pop song or a moving classical piece, music speaks to the soul.",
        ],
    ),
    (
        "technology",
        &[
            "Technology is evolving at an incredible pace! From AI assistants like me to quantum computers and space exploration, we're living in exciting times. What tech interests you most?",
        ],
    ),
    (
        "hello",
        &[
            "Hello there! I'm excited to chat with you today. What's on your mind?",
        ],
    ),
    (
        "help",
        &[
            "I'd love to help you with whatever you need! Whether it's answering questions, having a conversation, or exploring topics together, I'm here for you.",
        ],
    ),
];

/// Keyword → curated-topic aliases, consulted after exact matching.
pub(crate) const TOPIC_ALIASES: &[(&str, &str)] = &[
    ("virtual", "vr"),
    ("oculus", "vr"),
    ("headsets", "headset"),
    ("headphones", "headset"),
    ("earbuds", "headset"),
    ("cola", "drinks"),
    ("soda", "drinks"),
    ("beverage", "drinks"),
    ("beverages", "drinks"),
    ("guitar", "music"),
    ("band", "music"),
    ("song", "music"),
    ("songs", "music"),
    ("concert", "music"),
    ("manga", "anime"),
    ("otaku", "anime"),
    ("computers", "technology"),
    ("software", "technology"),
    ("gadgets", "technology"),
];

/// Descriptions for one curated topic, if present.
pub(crate) fn topic_descriptions(topic: &str) -> Option<&'static [&'static str]> {
    TOPIC_RESPONSES
        .iter()
        .find(|(name, _)| *name == topic)
        .map(|(_, replies)| *replies)
}

// ── Direct-request triggers ──────────────────────────────────────────────────

pub(crate) const JOKE_PHRASES: &[&str] = &[
    "tell me a joke",
    "tell a joke",
    "joke",
    "funny",
    "humor",
    "laugh",
    "tell me something funny",
    "make me laugh",
];

pub(crate) const CODING_WORDS: &[&str] =
    &["code", "program", "write code", "programming", "function", "script"];

// ── Jokes ────────────────────────────────────────────────────────────────────

pub(crate) const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a fish without eyes? A fsh!",
    "Why don't scientists trust atoms? Because they make up everything!",
    "What did the ocean say to the beach? Nothing, it just waved!",
    "Why did the math book look so sad? Because it had too many problems!",
    "What do you call a sleeping dinosaur? A dino-snore!",
    "Why did the drummer bring a ladder to band practice? To reach the high notes!",
];

pub(crate) const JOKE_FOLLOWUPS: &[&str] = &[
    "Hope that made you smile!",
    "Want to hear another one?",
    "I've got plenty more where that came from!",
    "That one always gets me!",
];

// ── Openers and closers ──────────────────────────────────────────────────────

pub(crate) const QUESTION_STARTERS: &[&str] = &[
    "That's a great question about",
    "When it comes to",
    "I think about",
    "From what I understand about",
    "Regarding",
];

pub(crate) const OPINION_PHRASES: &[&str] = &[
    "In my view,",
    "I believe that",
    "From my perspective,",
    "I think that",
    "It seems to me that",
];

pub(crate) const CONTINUATION_PHRASES: &[&str] = &[
    "What do you think about that?",
    "How does that sound to you?",
    "What's your experience with this?",
    "I'd love to hear your thoughts.",
    "What would you add to that?",
];

pub(crate) const ENTHUSIASM_OPENERS: &[&str] = &[
    "I love your energy!",
    "Your excitement is contagious!",
    "Right there with you!",
];

// ── No-keyword sentiment families ────────────────────────────────────────────

pub(crate) const POSITIVE_REPLIES: &[&str] = &[
    "Your positive energy is wonderful! What's making you happy today?",
    "I love the good vibes! What's going well for you?",
    "That's lovely to hear! Tell me more.",
];

pub(crate) const NEGATIVE_REPLIES: &[&str] = &[
    "I'm sorry things feel rough right now. Want to talk about it?",
    "That sounds hard. I'm here to listen.",
    "I hear you. What's weighing on you?",
];

// ── Template families ────────────────────────────────────────────────────────

/// The six generic keyword reply shapes.
pub(crate) fn keyword_templates(keyword: &str) -> Vec<String> {
    vec![
        format!("I find {keyword} quite interesting. What specifically interests you about it?"),
        format!("That's a great topic about {keyword}. Can you tell me more?"),
        format!("I'd love to learn more about {keyword} from your perspective."),
        format!("When you mention {keyword}, what comes to mind first?"),
        format!("I'm curious about your experience with {keyword}."),
        format!("That's fascinating! How did you get interested in {keyword}?"),
    ]
}

/// Reply shapes that splice a stored fact into the answer.
pub(crate) fn knowledge_templates(topic: &str, fact: &str, is_question: bool) -> Vec<String> {
    if is_question {
        vec![
            format!("Great question! Here's what I know about {topic}: {fact}"),
            format!("From what I've learned about {topic}: {fact}"),
            format!("I can tell you a bit about {topic}. {fact}"),
        ]
    } else {
        vec![
            format!("Speaking of {topic}, here's something I've picked up: {fact}"),
            format!("That reminds me of something about {topic}. {fact}"),
            format!("I've learned a little about {topic}. {fact}"),
        ]
    }
}

/// Keyword replies conditioned on question-ness, sentiment, and whether
/// the topic already has a record.
pub(crate) fn intelligent_templates(
    keyword: &str,
    is_question: bool,
    sentiment: Sentiment,
    known_topic: bool,
) -> Vec<String> {
    if is_question {
        return if known_topic {
            vec![
                format!("We've talked about {keyword} before! What more would you like to know?"),
                format!("Good question about {keyword}. Which part should we dig into?"),
                format!("I've been keeping notes on {keyword}. Ask away!"),
            ]
        } else {
            vec![
                format!("That's a great question about {keyword}! I don't know much yet - what do you know about it?"),
                format!("I haven't learned much about {keyword} yet. Can you tell me more?"),
                format!("I'm still learning about {keyword}. What would you like to explore together?"),
            ]
        };
    }

    match sentiment {
        Sentiment::Positive => {
            if known_topic {
                vec![
                    format!("I can tell you enjoy {keyword}! It keeps coming up in the best way."),
                    format!("Your enthusiasm for {keyword} is contagious! What do you like most about it?"),
                    format!("It's great how much you like {keyword}. Tell me more!"),
                ]
            } else {
                vec![
                    format!("I love your enthusiasm about {keyword}! What makes it special to you?"),
                    format!("Sounds like {keyword} makes you happy. I'd love to hear more!"),
                    format!("That positive energy about {keyword} is wonderful! How did you get into it?"),
                ]
            }
        }
        Sentiment::Negative => {
            if known_topic {
                vec![
                    format!("I know {keyword} has come up before - sounds rough this time. Want to talk it through?"),
                    format!("Sorry {keyword} is giving you trouble. What's going wrong?"),
                    format!("That's frustrating about {keyword}. I'm here if you want to vent."),
                ]
            } else {
                vec![
                    format!("Sounds like {keyword} isn't going well. Want to tell me what happened?"),
                    format!("I'm sorry {keyword} is bothering you. What's the situation?"),
                    format!("That sounds frustrating. What's the trouble with {keyword}?"),
                ]
            }
        }
        Sentiment::Neutral => {
            if known_topic {
                vec![
                    format!("Ah, {keyword} again! What's new with it?"),
                    format!("We've touched on {keyword} before. What's on your mind this time?"),
                    format!("I remember {keyword} coming up. What would you like to discuss about it?"),
                ]
            } else {
                keyword_templates(keyword)
            }
        }
    }
}

/// Used when every curated description would repeat a recent reply.
pub(crate) fn varied_topic_fallback(topic: &str) -> String {
    format!("We've covered {topic} quite a bit! Is there a specific part of it you'd like to explore?")
}

/// Used when every keyword template would repeat a recent reply.
pub(crate) fn neutral_keyword_fallback(keyword: &str) -> String {
    format!("I'd like to hear more about {keyword}.")
}
