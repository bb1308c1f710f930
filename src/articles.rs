//! Static article corpus
//!
//! Fixed collection of encouragement articles for daily delivery, with
//! random non-repeating selection against recently served titles. Selection
//! is the only randomness in the crate; everything downstream of it is
//! deterministic.

use rand::Rng;
use serde::Serialize;

/// Words per minute assumed when estimating read time
const READ_TIME_WPM: usize = 180;

/// A static corpus entry
#[derive(Debug, Clone, Copy)]
pub struct Article {
    pub title: &'static str,
    pub content: &'static str,
    pub keywords: &'static [&'static str],
    pub author: &'static str,
    pub source_url: &'static str,
}

/// An article prepared for delivery, with computed read time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyArticleDraft {
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub read_time_min: u32,
    pub author: String,
    pub source_url: String,
}

pub const ARTICLES: [Article; 6] = [
    Article {
        title: "Small Steps Beat Giant Leaps",
        content: "We often tell ourselves that real change requires dramatic action. A new job, a \
complete lifestyle overhaul, or a total personality shift. But the smallest experiments compound \
into remarkable transformations.\n\nThink of building confidence like training for a marathon. \
You wouldn't run 26 miles on day one. You'd start with a 5K, then gradually add distance. The \
same applies to social anxiety.\n\nConsider Sarah, who struggled with speaking up in meetings. \
Instead of forcing herself into presentations, she started by asking one question per meeting. \
Just one. By week three, it felt natural. By week six, she wasn't even thinking about it anymore. \
Now she leads quarterly reviews.\n\nThe magic isn't in the size of the step. It's in the \
consistency.\n\n**Your micro-experiment this week:**\n- If socializing feels overwhelming, commit \
to one small interaction. A five-minute coffee chat counts.\n- If public speaking terrifies you, \
practice with a smaller group first.\n- If you struggle with rejection, make one small request \
you might normally avoid.\n\nThe goal isn't perfection. It's progress. One small move, repeated, \
becomes momentum.",
        keywords: &["confidence", "small steps", "anxiety", "progress", "micro-habits"],
        author: "Anonymous",
        source_url: "",
    },
    Article {
        title: "When Silence Feels Like Judgment",
        content: "Awkward silences have a special power. For people with social anxiety, they can \
feel catastrophic. The pause in conversation somehow means you've failed. Everyone's judging. The \
whole interaction is ruined.\n\nBut the truth is that awkward silences are normal. They happen to \
everyone.\n\nDuring a recent dinner, I watched a skilled conversationalist handle a 10-second \
silence beautifully. Instead of panicking, they took a sip of water, smiled, and asked the other \
person a genuine question. No apology. No explanation. Just moving forward.\n\nThat silence \
wasn't the death of the conversation. It was just a pause.\n\n**Why this matters:**\n- Silence \
gives people time to think; it's a gift, not a failure\n- Not every moment needs to be filled \
with words\n- Pauses often feel longer to you than to others\n\n**When silence happens:**\n1. \
Take a breath (it's okay to pause)\n2. Ask a genuine question about the other person\n3. Trust \
that the conversation can resume naturally\n\nSilences don't define you. How you handle them \
does. And most people handle them just fine by doing absolutely nothing.",
        keywords: &["social anxiety", "conversation", "awkwardness", "confidence", "communication"],
        author: "Anonymous",
        source_url: "",
    },
    Article {
        title: "Breath: Your Anchor in Anxious Moments",
        content: "Your breath is the one thing you control during anxiety. Not your heart rate. \
Not your thoughts. Your breath.\n\nWhen anxiety hits, our breathing becomes shallow and fast. We \
tighten our chest. Our body goes into fight-or-flight mode. But we can reverse this with \
intention.\n\n**The 4-7-8 breathing technique:**\n- Inhale for 4 counts (through your nose)\n- \
Hold for 7 counts\n- Exhale for 8 counts (through your mouth)\n- Repeat 4 times\n\nThis isn't \
magic. It's biology. When you exhale longer than you inhale, your nervous system downshifts. \
You're literally sending a calm-down signal to your brain.\n\nI practiced this before a \
presentation I was dreading. Not because it made the anxiety disappear, but because it reminded \
me that I'm in control of this moment. My breath is my anchor.\n\nThat's the shift we need. Not \
\"be confident.\" But \"take control of what you can control.\"\n\n**Your practice:**\n- Try the \
4-7-8 breath three times before bed this week\n- Practice it when you're calm, so it's automatic \
when you're anxious\n- Notice how your body responds\n\nWhen anxiety arrives, you'll have a tool. \
Something concrete. Something that works.",
        keywords: &["breathing", "anxiety relief", "calm", "mindfulness", "grounding"],
        author: "Anonymous",
        source_url: "",
    },
    Article {
        title: "Building Confidence One Small Win at a Time",
        content: "We wait for confidence to appear fully formed, like an overnight achievement. \
But confidence isn't built that way. It's built on evidence.\n\nEvery time you do something \
despite fear, you're gathering evidence that you can handle it. Over time, that evidence stacks \
up. Soon, you believe it.\n\nThink about it this way: you weren't always confident driving a car. \
The first time, it was terrifying. But after a hundred drives, you barely think about it. That's \
because you have evidence. Proof. Experience.\n\nThe same applies to social situations.\n\nEach \
small interaction, even a brief conversation with a barista, is evidence. \"I did that. And I \
survived. And it was okay.\" Repeat that enough times, and your brain rewires.\n\n**This week, \
gather one piece of evidence:**\n- Strike up a brief conversation with a stranger\n- Share an \
opinion in a meeting\n- Say something kind to someone you respect\n- Make eye contact when you \
normally wouldn't\n\nIt doesn't need to be perfect. It just needs to happen.\n\nIn six months, \
you'll look back and wonder why you were ever anxious about the thing you're now doing naturally. \
Confidence grows from action, not thought.",
        keywords: &["confidence building", "self-belief", "growth mindset", "achievement", "courage"],
        author: "Anonymous",
        source_url: "",
    },
    Article {
        title: "Turning Nervousness Into Energy",
        content: "Nervousness and excitement feel almost identical in your body. Racing heart. \
Butterflies. Heightened attention. The only difference is how you label it.\n\nIf you label it \
\"anxiety,\" your body stays in threat mode. If you label it \"excitement,\" your body shifts \
into growth mode.\n\nBefore a presentation I was dreading, I tried something different. Instead \
of \"I'm so nervous,\" I said, \"I'm so excited.\" Did I believe it? Not fully. But my body \
seemed to. My breathing shifted. My energy felt different.\n\nIt's not about pretending the fear \
isn't there. It's about recognizing that this energy isn't all threat. Some of it is \
potential.\n\n**The neuroscience:**\n- Anxiety and excitement activate the same systems\n- The \
meaning you assign determines how your body responds\n- You can shift the narrative\n\n**Try \
this before something challenging:**\n- Instead of \"I'm nervous,\" say \"I'm excited\"\n- Notice \
what shifts in your body\n- Trust that the energy is there to serve you, not sabotage you\n\nYou \
don't need to eliminate the feeling. You just need to reframe what it means. That nervous energy \
is fuel. Use it.",
        keywords: &["anxiety", "reframing", "confidence", "performance", "mindset"],
        author: "Anonymous",
        source_url: "",
    },
    Article {
        title: "The Power of Showing Up",
        content: "There's a quote worth remembering: \"80% of success is just showing up.\" It \
sounds simple, but for someone with social anxiety, showing up is monumental.\n\nShowing up to \
the event you almost cancelled. Showing up to the conversation you almost avoided. Showing up to \
the presentation despite the fear.\n\nConsistency beats perfection every time. And showing up is \
the ultimate consistency.\n\nI watched someone transform their social confidence not through \
therapy or affirmations, but through pure repetition. They showed up to every event. Some nights \
they were awkward. Some nights they felt invisible. But they showed up. And over months, \
something shifted. The awkwardness didn't disappear; they just stopped caring about it as \
much.\n\nWhat changed is that they had evidence. Real, lived evidence. \"I show up. I'm still \
okay. I can do this.\"\n\n**This week:**\n- Commit to one social event you'd normally skip\n- \
Don't aim for perfect social behavior\n- Just show up\n\nThe magic isn't in being amazing. It's \
in being consistent. It's in proving to yourself that you can do hard things.\n\nShowing up is \
already enough. Everything else is bonus.",
        keywords: &["consistency", "courage", "persistence", "growth", "resilience"],
        author: "Anonymous",
        source_url: "",
    },
];

/// Pick a random article whose title is not in `recent_titles`.
///
/// When every title has been served recently, the exclusion resets and the
/// pick comes from the full corpus.
pub fn pick_unused_article(recent_titles: &[String]) -> &'static Article {
    let available: Vec<&'static Article> = ARTICLES
        .iter()
        .filter(|article| !recent_titles.iter().any(|title| title == article.title))
        .collect();

    let mut rng = rand::thread_rng();
    if available.is_empty() {
        log::info!("article corpus exhausted; resetting exclusion window");
        &ARTICLES[rng.gen_range(0..ARTICLES.len())]
    } else {
        available[rng.gen_range(0..available.len())]
    }
}

/// Reading time in whole minutes at 180 words per minute, floored at 1
fn read_time_min(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    (words.div_ceil(READ_TIME_WPM) as u32).max(1)
}

/// Prepare a daily article draft: pick an unused article and attach the
/// computed read time
pub fn daily_article_draft(recent_titles: &[String]) -> DailyArticleDraft {
    let article = pick_unused_article(recent_titles);
    log::info!("selected daily article: {}", article.title);

    DailyArticleDraft {
        title: article.title.to_string(),
        content: article.content.to_string(),
        keywords: article.keywords.iter().map(|k| k.to_string()).collect(),
        read_time_min: read_time_min(article.content),
        author: article.author.to_string(),
        source_url: article.source_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_titles_are_skipped() {
        let recent: Vec<String> = ARTICLES[1..]
            .iter()
            .map(|article| article.title.to_string())
            .collect();

        for _ in 0..20 {
            let picked = pick_unused_article(&recent);
            assert_eq!(picked.title, ARTICLES[0].title);
        }
    }

    #[test]
    fn test_exhausted_corpus_resets() {
        let recent: Vec<String> = ARTICLES
            .iter()
            .map(|article| article.title.to_string())
            .collect();

        let picked = pick_unused_article(&recent);
        assert!(ARTICLES.iter().any(|article| article.title == picked.title));
    }

    #[test]
    fn test_read_time_floors_at_one_minute() {
        assert_eq!(read_time_min("short"), 1);
        let long = "word ".repeat(400);
        // 400 words at 180 wpm rounds up to 3 minutes
        assert_eq!(read_time_min(&long), 3);
    }

    #[test]
    fn test_draft_carries_corpus_fields() {
        let draft = daily_article_draft(&[]);
        assert!(!draft.title.is_empty());
        assert!(!draft.content.is_empty());
        assert!(!draft.keywords.is_empty());
        assert!(draft.read_time_min >= 1);
    }

    #[test]
    fn test_corpus_titles_are_unique() {
        for (i, a) in ARTICLES.iter().enumerate() {
            for b in &ARTICLES[i + 1..] {
                assert_ne!(a.title, b.title);
            }
        }
    }
}
