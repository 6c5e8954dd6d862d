use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::sampling::Sampler;
use crate::types::{SocialCategory, SocialPost};

struct MockUser {
    name: &'static str,
    username: &'static str,
    avatar: &'static str,
}

const USERS: [MockUser; 5] = [
    MockUser {
        name: "Alice Johnson",
        username: "alicej",
        avatar: "https://randomuser.me/api/portraits/women/44.jpg",
    },
    MockUser {
        name: "Bob Smith",
        username: "bob_smith",
        avatar: "https://randomuser.me/api/portraits/men/32.jpg",
    },
    MockUser {
        name: "Carlos Rivera",
        username: "carlosr",
        avatar: "https://randomuser.me/api/portraits/men/85.jpg",
    },
    MockUser {
        name: "Diana Lee",
        username: "dianalee",
        avatar: "https://randomuser.me/api/portraits/women/68.jpg",
    },
    MockUser {
        name: "Emily Chen",
        username: "emchen",
        avatar: "https://randomuser.me/api/portraits/women/12.jpg",
    },
];

const IMAGES: [&str; 10] = [
    "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1541167760496-1628856ab772?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1555066931-4365d14bab8c?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1489599859473-790b99926305?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1551183053-bf91a1d81141?auto=format&fit=crop&w=400&q=80",
    "https://images.unsplash.com/photo-1529156069898-49953e39b3ac?auto=format&fit=crop&w=400&q=80",
];

use crate::types::SocialCategory::{Fitness, HealthWellness, Humor, Technology, TravelLifestyle};

/// (category, body, hashtags)
const BANK: [(SocialCategory, &str, &str); 50] = [
    (
        Technology,
        "I automated deployments with GitHub Actions and now a single push to main triggers live updates—dev life simplified with CI/CD magic.",
        "#DevOps #Automation #CodeLife",
    ),
    (
        Technology,
        "Built a VS Code snippet plugin for boilerplate—coding feels faster and cleaner when typing less and creating more.",
        "#DeveloperTools #VSCode #Productivity",
    ),
    (
        Technology,
        "Refactoring with Redux Toolkit cleaned up all state logic—boilerplate gone, debugging easier than ever before.",
        "#ReactJS #CleanCode #DevUX",
    ),
    (
        Technology,
        "Testing Localstack for AWS services—just mocked S3 and DynamoDB in under 5 minutes. Speedy backend development FTW.",
        "#Serverless #Testing #Localstack",
    ),
    (
        Technology,
        "Upgraded error monitoring using Sentry—caught production bugs before they became users' problems. Proactive dev is best.",
        "#ErrorTracking #SRE #Sentry",
    ),
    (
        Technology,
        "Experimented with GraphQL federation today—multiple subgraphs merged into one endpoint. Modern APIs leveling up.",
        "#GraphQL #API #DeveloperJourney",
    ),
    (
        Technology,
        "Slow build times fixed with Webpack caching—saved actual hours on every compile. Efficiency unlocked!",
        "#Webpack #BuildTools #Speed",
    ),
    (
        Technology,
        "Tried LogRocket session replay—seeing UI bugs happen live is surreal. Debugging just became visual and painless.",
        "#Monitoring #UX #FrontendTools",
    ),
    (
        Technology,
        "Containerized app with Docker and deployed it to Kubernetes cluster—production parity and scalability now baked in.",
        "#Docker #Kubernetes #Scalability",
    ),
    (
        Technology,
        "Switched to TypeScript from JavaScript—intellisense, typing, and fewer runtime bugs feel like a gift.",
        "#TypeScript #StaticTyping #DevBestPractices",
    ),
    (
        HealthWellness,
        "Started each morning with 10-minute mindfulness—focused, calm, and my stress levels have noticeably dropped.",
        "#Mindfulness #SelfCare #MentalHealth",
    ),
    (
        HealthWellness,
        "Replaced my afternoon soda with infused water—still refreshing, less sugar, and my energy is more consistent now.",
        "#HealthyHabits #Hydration #Wellness",
    ),
    (
        HealthWellness,
        "A quick desk stretch every hour rescued me from shoulder aches—small changes that make big ergonomic difference.",
        "#DeskWellness #Ergonomics #WorkHealth",
    ),
    (
        HealthWellness,
        "Took a walk outdoors without my phone—just fresh air and nature. Felt like a reset button for my brain.",
        "#DigitalDetox #MindfulLiving #Nature",
    ),
    (
        HealthWellness,
        "Added a sunset meditation session—ended my day with calm breathwork and steadier sleep quality.",
        "#EveningRitual #Relaxation #InnerPeace",
    ),
    (
        HealthWellness,
        "Swapped late-night snacks for herbal tea—the ritual calms my mind and supports digestion much better.",
        "#HealthySwap #Wellbeing #NightRoutine",
    ),
    (
        HealthWellness,
        "Implemented hydration reminders every hour—my concentration and mood have improved, plus skin glows more.",
        "#HydrationHack #DailyWellness #SelfCare",
    ),
    (
        HealthWellness,
        "Took a mid-day break for deep breathing—5 minutes of pause helped me reset and overcome mental fatigue.",
        "#MindfulnessBreak #WorkWellness #Calm",
    ),
    (
        HealthWellness,
        "Started a gratitude journal at night—listing small wins before bed calms my mind and improves sleep.",
        "#Gratitude #MentalHealth #DailyRitual",
    ),
    (
        HealthWellness,
        "Swapped one screen hour for reading a physical book every evening—it feels restorative and frees my mind.",
        "#ScreenBreak #SelfCare #PeacefulEvenings",
    ),
    (
        Fitness,
        "Crushed a 15-minute HIIT session before breakfast—felt woken up, energized, and ready to take on the day.",
        "#HIIT #HomeWorkout #FitStart",
    ),
    (
        Fitness,
        "Beat my 5K personal best with consistency in training—progress indeed comes from showing up.",
        "#Running #FitnessGoals #Consistency",
    ),
    (
        Fitness,
        "Used a foam roller post-workout and feel less sore today—great recovery means ready for tomorrow’s session.",
        "#Recovery #FitnessTips #SelfCare",
    ),
    (
        Fitness,
        "Sneaked in calf raises while brushing teeth—micro workouts add up when life is busy.",
        "#FitnessHacks #HealthyHabits #EverydayFitness",
    ),
    (
        Fitness,
        "Yoga flow at lunch break cleared mental clutter and improved posture—flexibility meets focus.",
        "#YogaBreak #WorkWellness #Stretch",
    ),
    (
        Fitness,
        "Swapped afternoon coffee for green tea—felt calm energy and fewer caffeine jitters.",
        "#HealthyAlternative #FitnessFuel #Wellness",
    ),
    (
        Fitness,
        "From zero to consistent push-up sets in a month—strength is built one rep at a time.",
        "#FitnessJourney #BodyweightTraining #Progress",
    ),
    (
        Fitness,
        "Loved the burn from today’s squat ladder—challenging, fun, and worth every muscle complaint.",
        "#LegDay #WorkoutMotivation #StrongBody",
    ),
    (
        Fitness,
        "Tried resistance band circuit—it’s compact, portable, and hit muscles in ways I hadn’t expected.",
        "#ResistanceTraining #WorkoutAnywhere #FitLife",
    ),
    (
        Fitness,
        "Ended day with a calming stretch sequence—lengthened muscles and calmed my mind after screen time.",
        "#Stretching #EveningRoutine #Wellness",
    ),
    (
        TravelLifestyle,
        "Spent my morning writing by a riverside café—coffee, the gentle water flow, and sunlight made productivity feel indulgent.",
        "#CaféVibes #CreativeFlow #CozyMornings",
    ),
    (
        TravelLifestyle,
        "Stumbled upon a local artisan market filled with handcrafted goods and vibrant energy—it’s amazing what’s right in our own backyard.",
        "#LocalTravel #SupportLocal #WeekendWander",
    ),
    (
        TravelLifestyle,
        "Rainy night in with tea and poetry—soft lamps, warm mug, and introspection equals the sweetest comfort.",
        "#CozyLife #SelfCare #NightIn",
    ),
    (
        TravelLifestyle,
        "Dusk stroll through cobblestone lanes with lantern glow, distant laughter, and hidden cafes—it’s magic found on quiet streets.",
        "#UrbanEscape #TravelMoments #EveningWander",
    ),
    (
        TravelLifestyle,
        "Cloud-watching in my backyard with soft music—beautiful reminder that stillness speaks volumes.",
        "#SlowLiving #Mindfulness #NatureTherapy",
    ),
    (
        TravelLifestyle,
        "Staycation turned adventure—discovered a hidden park waterfall a few blocks away. Hidden gems everywhere.",
        "#Staycation #LocalGems #NatureNearby",
    ),
    (
        TravelLifestyle,
        "Favorite brunch spot with sunlight streaming in, a book, and perfectly brewed coffee—simple pleasures are everything.",
        "#CaféLife #BrunchVibes #SimpleJoy",
    ),
    (
        TravelLifestyle,
        "Tuned my porch into a zen nook—plants, fairy lights, and a good playlist. Peaceful evenings never looked better.",
        "#OutdoorLiving #CozyCorner #Relax",
    ),
    (
        TravelLifestyle,
        "City sunset paint the skyline pink—took a moment to freeze beauty before the hustle.",
        "#UrbanBeauty #SunsetChasers #MindfulMoments",
    ),
    (
        TravelLifestyle,
        "Night sky full of stars, polyphonic crickets, and no urban glow—my favorite view yet.",
        "#StarGazing #NatureLove #QuietNights",
    ),
    (
        Humor,
        "When your build passes on first try—cue the victory dance and instant confidence boost.",
        "#DeveloperLife #SmallWins #CodeHumor",
    ),
    (
        Humor,
        "Spilled coffee on my keyboard but the build passed anyway—technology loves a good drama.",
        "#RemoteWork #CoffeeFails #DevStruggles",
    ),
    (
        Humor,
        "Opened my project Monday like it’s a fresh surprise—Friday logic turned into spaghetti code overnight. Debug begins now.",
        "#CodeLife #DevProblems #RealTalk",
    ),
    (
        Humor,
        "Refreshed console log 100 times before realizing typo broke everything—rage and relief wrapped in one.",
        "#ProgrammerHumor #BugHunt #LOL",
    ),
    (
        Humor,
        "When the test suite passes and you whisper, ‘I’m sorry I doubted you’—bragging rights earned.",
        "#TestingLife #DevLife #RareVictory",
    ),
    (
        Humor,
        "Debugged a race condition by adding a delay—sometimes the oldest tricks are still the best.",
        "#TechHumor #CodeFix #DevHacks",
    ),
    (
        Humor,
        "Restarted computer, restarted dev, restarted life—and somehow things worked after that.",
        "#ITCrowd #TechLife #CoffeeFix",
    ),
    (
        Humor,
        "When auto-indentation ruins your code but it compiles anyway—embracing chaos, one build at a time.",
        "#FormattingFails #DevMood #LOL",
    ),
    (
        Humor,
        "My code didn’t work. Then I added a comment and it magically did—still shouting ‘magic!’ in my head.",
        "#DeveloperMagic #LOL #CodeHumor",
    ),
    (
        Humor,
        "Pretended I was debugging but really just timed how long I could stare at the screen—time well wasted.",
        "#Procrastination #DevLife #Relatable",
    ),
];

/// Synthesizes social posts from a fixed bank.
#[derive(Debug, Clone)]
pub struct SocialGenerator {
    sampler: Arc<Sampler>,
}

impl SocialGenerator {
    pub fn new(sampler: Arc<Sampler>) -> Self {
        Self { sampler }
    }

    /// Posts whose category label is in `categories`, or the whole bank when
    /// `categories` is empty. Unknown labels match nothing.
    ///
    /// Ids are dense from 1 in bank order. Users and images cycle by
    /// position in the filtered list.
    pub fn generate<S: AsRef<str>>(&self, categories: &[S]) -> Vec<SocialPost> {
        let wanted: Vec<SocialCategory> = categories
            .iter()
            .filter_map(|c| SocialCategory::from_label(c.as_ref()))
            .collect();

        let posts: Vec<SocialPost> = BANK
            .iter()
            .filter(|(category, _, _)| categories.is_empty() || wanted.contains(category))
            .enumerate()
            .map(|(i, &(category, body, hashtags))| {
                let user = &USERS[i % USERS.len()];
                SocialPost {
                    id: i as u64 + 1,
                    user_id: (i % USERS.len()) as u64 + 1,
                    username: user.name.to_string(),
                    handle: format!("@{}", user.username),
                    avatar: user.avatar.to_string(),
                    title: None,
                    body: body.to_string(),
                    hashtags: hashtags.split_whitespace().map(str::to_string).collect(),
                    category,
                    image: IMAGES[i % IMAGES.len()].to_string(),
                    timestamp: self.sampler.recent(Duration::days(7)),
                    likes: self.sampler.between(10..=1009),
                    comments: self.sampler.between(1..=100),
                    shares: self.sampler.between(1..=50),
                }
            })
            .collect();

        debug!(requested = categories.len(), count = posts.len(), "generated social posts");
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::FixedClock;
    use chrono::{TimeZone, Utc};

    fn generator(seed: u64) -> SocialGenerator {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
        SocialGenerator::new(Arc::new(Sampler::seeded(seed, clock)))
    }

    #[test]
    fn bank_has_ten_posts_per_category() {
        for category in SocialCategory::BANK {
            assert_eq!(BANK.iter().filter(|(c, _, _)| *c == category).count(), 10, "{category}");
        }
    }

    #[test]
    fn empty_filter_returns_whole_bank() {
        let none: [&str; 0] = [];
        let posts = generator(1).generate(&none);
        assert_eq!(posts.len(), 50);
        assert_eq!(posts[49].id, 50);
    }

    #[test]
    fn fitness_filter_renumbers_densely() {
        let posts = generator(1).generate(&["Fitness"]);
        assert_eq!(posts.len(), 10);
        assert!(posts.iter().all(|p| p.category == SocialCategory::Fitness));
        let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(posts[0].username, "Alice Johnson");
        assert_eq!(posts[5].username, "Alice Johnson");
        assert_eq!(posts[6].handle, "@bob_smith");
        assert_eq!(posts[6].user_id, 2);
        assert_eq!(posts[1].image, IMAGES[1]);
    }

    #[test]
    fn several_categories_keep_bank_order() {
        let posts = generator(1).generate(&["humor & relatable moments", "Technology"]);
        assert_eq!(posts.len(), 20);
        assert_eq!(posts[0].category, SocialCategory::Technology);
        assert_eq!(posts[19].category, SocialCategory::Humor);
    }

    #[test]
    fn bank_text_keeps_its_punctuation() {
        let posts = generator(1).generate(&["Technology"]);
        let first = &posts[0].body;
        assert!(first.ends_with("live updates\u{2014}dev life simplified with CI/CD magic."));
        assert!(BANK.iter().any(|(_, body, _)| body.contains("didn\u{2019}t work")));
        assert!(BANK.iter().any(|(_, body, _)| body.contains("\u{2018}magic!\u{2019}")));

        let fitness = generator(1).generate(&["Fitness"]);
        assert!(fitness.iter().any(|p| p.body.contains("tomorrow\u{2019}s session")));
    }

    #[test]
    fn unknown_category_yields_nothing() {
        assert!(generator(1).generate(&["Cooking"]).is_empty());
    }

    #[test]
    fn same_seed_same_posts() {
        let a = generator(42).generate(&["Technology"]);
        let b = generator(42).generate(&["Technology"]);
        assert_eq!(a, b);
    }

    #[test]
    fn engagement_and_time_in_range() {
        let g = generator(3);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let none: [&str; 0] = [];
        for p in g.generate(&none) {
            assert!((10..=1009).contains(&p.likes));
            assert!((1..=100).contains(&p.comments));
            assert!((1..=50).contains(&p.shares));
            assert!(p.timestamp <= now && p.timestamp > now - Duration::days(7));
            assert_eq!(p.hashtags.len(), 3);
            assert!(p.hashtags.iter().all(|h| h.starts_with('#')));
        }
    }
}
