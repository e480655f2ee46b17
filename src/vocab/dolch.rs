//! Dolch sight words, grouped by level

pub const PRE_PRIMER: &[&str] = &[
    "a", "and", "away", "big", "blue", "can", "come", "down", "find", "for", "funny", "go", "help",
    "here", "I", "in", "is", "it", "jump", "little", "look", "make", "me", "my", "not", "one",
    "play", "red", "run", "said", "see", "the", "three", "to", "two", "up", "we", "where",
    "yellow", "you",
];

pub const PRIMER: &[&str] = &[
    "all", "am", "are", "at", "ate", "be", "black", "brown", "but", "came", "did", "do", "eat",
    "four", "get", "good", "have", "he", "into", "like", "must", "new", "no", "now", "on", "our",
    "out", "please", "pretty", "ran", "ride", "saw", "say", "she", "so", "soon", "that", "there",
    "they", "this", "too", "under", "want", "was", "well", "went", "what", "white", "who", "will",
    "with", "yes",
];

pub const FIRST_GRADE: &[&str] = &[
    "after", "again", "an", "any", "as", "ask", "by", "could", "every", "fly", "from", "give",
    "going", "had", "has", "her", "him", "his", "how", "just", "know", "let", "live", "may", "of",
    "old", "once", "open", "over", "put", "round", "some", "stop", "take", "thank", "them", "then",
    "think", "walk", "were", "when",
];

pub const SECOND_GRADE: &[&str] = &[
    "always", "around", "because", "been", "before", "best", "both", "buy", "call", "cold", "does",
    "don't", "fast", "first", "five", "found", "gave", "goes", "green", "its", "made", "many",
    "off", "or", "pull", "read", "right", "sing", "sit", "sleep", "tell", "their", "these",
    "those", "upon", "us", "use", "very", "wash", "which", "why", "wish", "work", "would", "write",
    "your",
];

pub const THIRD_GRADE: &[&str] = &[
    "about", "better", "bring", "carry", "clean", "cut", "done", "draw", "drink", "eight", "fall",
    "far", "full", "got", "grow", "hold", "hot", "hurt", "if", "keep", "kind", "laugh", "light",
    "long", "much", "myself", "never", "only", "own", "pick", "seven", "shall", "show", "six",
    "small", "start", "ten", "today", "together", "try", "warm",
];

/// Every level, easiest first
pub const LEVELS: &[&[&str]] = &[PRE_PRIMER, PRIMER, FIRST_GRADE, SECOND_GRADE, THIRD_GRADE];
