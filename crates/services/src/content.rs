//! Static learning content: the lesson path, question banks and game tables.
//!
//! Everything here is authored data. Shuffling is done with a caller supplied
//! RNG so tests can pin it down.

use academy_core::Error;
use academy_core::model::games::{MemoryBoard, WordBuilder, WordEntry};
use academy_core::model::quiz::QuizKind;
use academy_core::model::{Category, Difficulty, Lesson, LessonId, Question};
use rand::Rng;
use rand::seq::SliceRandom;

/// Questions in one flag match game.
pub const FLAG_QUESTIONS_PER_GAME: usize = 10;

/// Options shown for each flag.
pub const FLAG_OPTIONS: usize = 4;

/// Flag emoji and country name.
pub const FLAGS: [(&str, &str); 15] = [
    ("🇲🇽", "Mexico"),
    ("🇪🇸", "Spain"),
    ("🇦🇷", "Argentina"),
    ("🇨🇱", "Chile"),
    ("🇨🇴", "Colombia"),
    ("🇵🇪", "Peru"),
    ("🇧🇷", "Brazil"),
    ("🇺🇾", "Uruguay"),
    ("🇨🇷", "Costa Rica"),
    ("🇬🇹", "Guatemala"),
    ("🇵🇦", "Panama"),
    ("🇩🇴", "Dominican Republic"),
    ("🇨🇺", "Cuba"),
    ("🇻🇪", "Venezuela"),
    ("🇵🇷", "Puerto Rico"),
];

/// Word builder rounds: word and hint.
pub const WORDS: [(&str, &str); 15] = [
    ("HOLA", "Hello (in Spanish)"),
    ("AMIGO", "Friend"),
    ("FIESTA", "Party"),
    ("COLOR", "Hue, tint"),
    ("CASA", "House"),
    ("COMIDA", "Food"),
    ("SOL", "Sun"),
    ("LUNA", "Moon"),
    ("AGUA", "Water"),
    ("FLOR", "Flower"),
    ("TIEMPO", "Time / Weather"),
    ("FAMILIA", "Family"),
    ("MUNDO", "World"),
    ("ESCUELA", "School"),
    ("MUSICA", "Music"),
];

/// Memory match pairs: emoji and Spanish word.
pub const MEMORY_PAIRS: [(&str, &str); 6] = [
    ("🌮", "Taco"),
    ("🌯", "Burrito"),
    ("🫔", "Tamale"),
    ("🥑", "Aguacate"),
    ("🌶️", "Chile"),
    ("🍅", "Tomate"),
];

struct LessonEntry {
    id: u64,
    category: Category,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    locked: bool,
}

const LESSONS: [LessonEntry; 12] = [
    LessonEntry {
        id: 1,
        category: Category::Spanish,
        title: "Greetings",
        description: "Hello, How are you?",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 2,
        category: Category::Spanish,
        title: "Introductions",
        description: "My name is...",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 3,
        category: Category::Spanish,
        title: "Numbers",
        description: "One, two, three",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 4,
        category: Category::Spanish,
        title: "Colors",
        description: "Red, blue, green",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 5,
        category: Category::Geography,
        title: "Countries and Capitals",
        description: "Mexico, Spain, Peru...",
        difficulty: Difficulty::Medium,
        locked: false,
    },
    LessonEntry {
        id: 6,
        category: Category::Geography,
        title: "Mountains and Rivers",
        description: "Andes, Amazon...",
        difficulty: Difficulty::Hard,
        locked: true,
    },
    LessonEntry {
        id: 7,
        category: Category::Culture,
        title: "Day of the Dead",
        description: "A Mexican tradition",
        difficulty: Difficulty::Medium,
        locked: false,
    },
    LessonEntry {
        id: 8,
        category: Category::Culture,
        title: "Lucha Libre",
        description: "Masks and heroes",
        difficulty: Difficulty::Medium,
        locked: false,
    },
    LessonEntry {
        id: 9,
        category: Category::Culture,
        title: "Popular Festivals",
        description: "Carnival, Posadas...",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 10,
        category: Category::Cuisine,
        title: "Typical Foods",
        description: "Tacos, enchiladas, pozole",
        difficulty: Difficulty::Easy,
        locked: false,
    },
    LessonEntry {
        id: 11,
        category: Category::Cuisine,
        title: "Drinks",
        description: "Hibiscus water, horchata...",
        difficulty: Difficulty::Medium,
        locked: false,
    },
    LessonEntry {
        id: 12,
        category: Category::Cuisine,
        title: "Desserts",
        description: "Churros, caramel, flan",
        difficulty: Difficulty::Medium,
        locked: true,
    },
];

/// The learning path in display order.
///
/// # Errors
///
/// Returns `Error::Lesson` if an authored entry is invalid.
pub fn lessons() -> Result<Vec<Lesson>, Error> {
    LESSONS.iter().map(build_lesson).collect()
}

/// Look up one lesson of the path.
///
/// # Errors
///
/// Returns `Error::Lesson` if the authored entry is invalid.
pub fn lesson(id: LessonId) -> Result<Option<Lesson>, Error> {
    LESSONS
        .iter()
        .find(|entry| entry.id == id.value())
        .map(build_lesson)
        .transpose()
}

fn build_lesson(entry: &LessonEntry) -> Result<Lesson, Error> {
    Ok(Lesson::new(
        LessonId::new(entry.id),
        entry.category,
        entry.title,
        entry.description,
        entry.difficulty,
    )?
    .locked(entry.locked))
}

/// Questions for a lesson. Lessons without their own bank use Greetings.
///
/// # Errors
///
/// Returns `Error::Question` if an authored question is invalid.
pub fn lesson_questions(id: LessonId) -> Result<Vec<Question>, Error> {
    let bank = match id.value() {
        2 => INTRODUCTIONS,
        3 => NUMBERS,
        4 => COLORS,
        _ => GREETINGS,
    };
    build_questions(bank)
}

/// # Errors
///
/// Returns `Error::Question` if an authored question is invalid.
pub fn quick_quiz_questions() -> Result<Vec<Question>, Error> {
    build_questions(QUICK_QUIZ)
}

/// # Errors
///
/// Returns `Error::Question` if an authored question is invalid.
pub fn taco_trivia_questions() -> Result<Vec<Question>, Error> {
    build_questions(TACO_TRIVIA)
}

/// The fifteen exam questions.
///
/// # Errors
///
/// Returns `Error::Question` if an authored question is invalid.
pub fn exam_questions() -> Result<Vec<Question>, Error> {
    build_questions(EXAM)
}

/// Build a flag match game: distinct flags, each with the right country and
/// three distinct distractors in random order.
///
/// # Errors
///
/// Returns `Error::Question` if a generated question is invalid.
pub fn flag_questions<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<Question>, Error> {
    let mut picks: Vec<usize> = (0..FLAGS.len()).collect();
    picks.shuffle(rng);

    picks
        .into_iter()
        .take(FLAG_QUESTIONS_PER_GAME)
        .map(|answer| {
            let mut others: Vec<usize> = (0..FLAGS.len()).filter(|&i| i != answer).collect();
            others.shuffle(rng);
            let mut options: Vec<usize> = others.into_iter().take(FLAG_OPTIONS - 1).collect();
            options.push(answer);
            options.shuffle(rng);

            let correct = options.iter().position(|&i| i == answer).unwrap_or_default();
            let (emoji, country) = FLAGS[answer];
            Question::new(
                format!("Which country does this flag belong to? {emoji}"),
                options.iter().map(|&i| FLAGS[i].1),
                correct,
                format!("{emoji} is the flag of {country}."),
            )
            .map_err(Error::from)
        })
        .collect()
}

/// Questions for any quiz kind.
///
/// # Errors
///
/// Returns `Error::Question` if authored or generated content is invalid.
pub fn questions_for<R: Rng + ?Sized>(kind: QuizKind, rng: &mut R) -> Result<Vec<Question>, Error> {
    match kind {
        QuizKind::Lesson(id) => lesson_questions(id),
        QuizKind::QuickQuiz => quick_quiz_questions(),
        QuizKind::TacoTrivia => taco_trivia_questions(),
        QuizKind::FlagMatch => flag_questions(rng),
        QuizKind::Exam => exam_questions(),
    }
}

/// A shuffled memory board over [`MEMORY_PAIRS`].
///
/// # Errors
///
/// Returns `Error::Game` if the board cannot be laid out.
pub fn memory_board<R: Rng + ?Sized>(rng: &mut R) -> Result<MemoryBoard, Error> {
    let pairs: Vec<(String, String)> = MEMORY_PAIRS
        .iter()
        .map(|(emoji, word)| ((*emoji).to_owned(), (*word).to_owned()))
        .collect();
    let mut order: Vec<usize> = (0..pairs.len() * 2).collect();
    order.shuffle(rng);
    Ok(MemoryBoard::new(&pairs, Some(&order))?)
}

/// A word builder over [`WORDS`] with the first word already scrambled.
///
/// # Errors
///
/// Returns `Error::Game` if the words cannot be loaded.
pub fn word_builder<R: Rng + ?Sized>(rng: &mut R) -> Result<WordBuilder, Error> {
    let words = WORDS
        .iter()
        .map(|(word, hint)| WordEntry::new(*word, *hint))
        .collect();
    let mut builder = WordBuilder::new(words)?;
    scramble_current(&mut builder, rng)?;
    Ok(builder)
}

/// Scramble the tiles of the current word. Call after each `next`.
///
/// # Errors
///
/// Returns `Error::Game` once the round has started.
pub fn scramble_current<R: Rng + ?Sized>(
    builder: &mut WordBuilder,
    rng: &mut R,
) -> Result<(), Error> {
    let len = builder.tiles().len();
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    if len > 1 && order.iter().enumerate().all(|(i, &o)| i == o) {
        order.rotate_left(1);
    }
    Ok(builder.scramble(&order)?)
}

struct Entry {
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
}

fn build_questions(bank: &[Entry]) -> Result<Vec<Question>, Error> {
    bank.iter()
        .map(|entry| {
            Question::new(entry.prompt, entry.options, entry.correct, entry.explanation)
                .map_err(Error::from)
        })
        .collect()
}

const GREETINGS: &[Entry] = &[
    Entry {
        prompt: "How do you say 'Hello' in Spanish?",
        options: ["Goodbye", "Hello", "Good night", "See you later"],
        correct: 1,
        explanation: "Correct! 'Hola' is the most common way to greet in Spanish.",
    },
    Entry {
        prompt: "What does '¿Cómo estás?' mean in English?",
        options: ["How are you?", "Thank you", "Goodbye", "Hello"],
        correct: 0,
        explanation: "Excellent! '¿Cómo estás?' means 'How are you?'",
    },
    Entry {
        prompt: "How would you respond to 'Buenos días'?",
        options: ["Good night", "Good morning too", "Goodbye", "See you tomorrow"],
        correct: 1,
        explanation: "Perfect! It's polite to respond with 'Buenos días' back.",
    },
    Entry {
        prompt: "What does 'Mucho gusto' mean?",
        options: ["Goodbye", "Nice to meet you", "Thank you", "Excuse me"],
        correct: 1,
        explanation: "Good! 'Mucho gusto' is used when you meet someone for the first time.",
    },
    Entry {
        prompt: "How do you say 'Goodbye' formally?",
        options: ["Goodbye", "Hello", "See you later", "Good morning"],
        correct: 0,
        explanation: "Correct! 'Adiós' is the formal way to say goodbye.",
    },
    Entry {
        prompt: "What expression would you use in the afternoon?",
        options: ["Good morning", "Good afternoon", "Good night", "Hello"],
        correct: 1,
        explanation: "Exactly! 'Buenas tardes' is used from noon until evening.",
    },
    Entry {
        prompt: "How do you respond to '¿Qué tal?'?",
        options: ["Fine, thanks", "See you later", "Good morning", "Nice to meet you"],
        correct: 0,
        explanation: "Very good! 'Bien, gracias' is the most common response.",
    },
    Entry {
        prompt: "What is the informal way to say goodbye?",
        options: ["Goodbye", "See you", "Good night", "Nice to meet you"],
        correct: 1,
        explanation: "Correct! 'Nos vemos' is informal and friendly.",
    },
    Entry {
        prompt: "What does 'Hasta mañana' mean?",
        options: ["See you tomorrow", "Good night", "Good morning", "See you later"],
        correct: 0,
        explanation: "Excellent! 'Hasta mañana' means 'See you tomorrow'.",
    },
    Entry {
        prompt: "How do you greet at night?",
        options: ["Good morning", "Good afternoon", "Good night", "Hello"],
        correct: 2,
        explanation: "Perfect! 'Buenas noches' is used at night.",
    },
    Entry {
        prompt: "What expression do you use to introduce yourself?",
        options: ["My name is...", "How are you?", "Fine, thanks", "See you later"],
        correct: 0,
        explanation: "Very good! 'Me llamo...' means 'My name is...'",
    },
    Entry {
        prompt: "How do you say 'See you later' in Spanish?",
        options: ["Goodbye", "See you later", "Good morning", "Nice to meet you"],
        correct: 1,
        explanation: "Correct! 'Hasta luego' is 'See you later'.",
    },
    Entry {
        prompt: "What does 'Encantado/a' mean?",
        options: ["Goodbye", "Nice to meet you", "Thank you", "Hello"],
        correct: 1,
        explanation: "Good! 'Encantado/a' is another way to say 'Mucho gusto'.",
    },
];

const INTRODUCTIONS: &[Entry] = &[
    Entry {
        prompt: "How do you say 'My name is Carlos'?",
        options: ["My name is Carlos", "I am Carlos", "My name Carlos", "I Carlos"],
        correct: 0,
        explanation: "Correct! 'Me llamo Carlos' is the most common way.",
    },
    Entry {
        prompt: "What do you ask to know someone's name?",
        options: ["What's your name?", "How's it going?", "Where are you from?", "How old are you?"],
        correct: 0,
        explanation: "Excellent! '¿Cómo te llamas?' means 'What's your name?'",
    },
    Entry {
        prompt: "How do you respond to 'Mucho gusto'?",
        options: ["Likewise", "Goodbye", "Fine", "Hello"],
        correct: 0,
        explanation: "Perfect! 'Igualmente' means 'Likewise' or 'Nice to meet you too'.",
    },
    Entry {
        prompt: "What does 'Soy de México' mean?",
        options: ["I'm from Mexico", "I live in Mexico", "I like Mexico", "I visit Mexico"],
        correct: 0,
        explanation: "Good! 'Soy de...' means 'I'm from...'",
    },
    Entry {
        prompt: "How do you ask where someone is from?",
        options: ["Where do you live?", "Where are you from?", "What do you do?", "How are you?"],
        correct: 1,
        explanation: "Correct! '¿De dónde eres?' means 'Where are you from?'",
    },
    Entry {
        prompt: "What does '¿A qué te dedicas?' mean?",
        options: ["What do you do?", "Where do you live?", "How old are you?", "What's your name?"],
        correct: 0,
        explanation: "Excellent! It's a way to ask about work or studies.",
    },
    Entry {
        prompt: "How do you say 'I am a student'?",
        options: ["I am student", "I am being student", "I have student", "I do student"],
        correct: 0,
        explanation: "Very good! You use 'ser' for professions and occupations.",
    },
    Entry {
        prompt: "What does 'Vivo en Madrid' mean?",
        options: ["I work in Madrid", "I study in Madrid", "I live in Madrid", "I visit Madrid"],
        correct: 2,
        explanation: "Correct! 'Vivo en...' means 'I live in...'",
    },
    Entry {
        prompt: "How do you ask someone's age?",
        options: ["What age do you have?", "How many years do you have?", "How are you of age?", "What years?"],
        correct: 1,
        explanation: "Perfect! '¿Cuántos años tienes?' is the correct way.",
    },
    Entry {
        prompt: "What does 'Tengo veinte años' mean?",
        options: ["I have 20 brothers", "I am 20 years old", "I live 20 years", "I work 20 hours"],
        correct: 1,
        explanation: "Good! 'Tengo... años' means 'I am... years old'.",
    },
    Entry {
        prompt: "How do you say 'Nice to meet you' formally?",
        options: ["Mucho gusto", "Encantado/a", "Es un placer", "All of the above"],
        correct: 3,
        explanation: "Excellent! All are correct ways to say it.",
    },
    Entry {
        prompt: "What does '¿Hablas inglés?' mean?",
        options: ["Do you speak English?", "Where is English?", "I speak English", "English is easy"],
        correct: 0,
        explanation: "Correct! '¿Hablas...?' means 'Do you speak...?'",
    },
];

const NUMBERS: &[Entry] = &[
    Entry {
        prompt: "How do you say '1' in Spanish?",
        options: ["One", "Two", "Three", "Four"],
        correct: 0,
        explanation: "Correct! 'Uno' is the number 1.",
    },
    Entry {
        prompt: "What number is 'cinco'?",
        options: ["3", "5", "7", "9"],
        correct: 1,
        explanation: "Excellent! 'Cinco' is the number 5.",
    },
    Entry {
        prompt: "How do you say '10' in Spanish?",
        options: ["Eight", "Nine", "Ten", "Eleven"],
        correct: 2,
        explanation: "Perfect! 'Diez' is the number 10.",
    },
    Entry {
        prompt: "What number is 'quince'?",
        options: ["12", "15", "17", "20"],
        correct: 1,
        explanation: "Good! 'Quince' is the number 15.",
    },
    Entry {
        prompt: "How do you say '20' in Spanish?",
        options: ["Nineteen", "Twenty", "Twenty-one", "Thirty"],
        correct: 1,
        explanation: "Correct! 'Veinte' is the number 20.",
    },
    Entry {
        prompt: "What does 'treinta y cinco' mean?",
        options: ["25", "35", "45", "55"],
        correct: 1,
        explanation: "Excellent! 'Treinta y cinco' is 35.",
    },
    Entry {
        prompt: "How do you say '100' in Spanish?",
        options: ["One hundred", "One hundred (with noun)", "One thousand", "Ten"],
        correct: 0,
        explanation: "Very good! 'Cien' is the number 100.",
    },
    Entry {
        prompt: "What number is 'setenta'?",
        options: ["60", "70", "80", "90"],
        correct: 1,
        explanation: "Correct! 'Setenta' is the number 70.",
    },
    Entry {
        prompt: "How do you say '500' in Spanish?",
        options: ["Five hundred", "Five hundreds", "Five hundred", "Five hundred (feminine)"],
        correct: 0,
        explanation: "Perfect! 'Quinientos' is the number 500.",
    },
    Entry {
        prompt: "What does 'mil' mean?",
        options: ["100", "500", "1000", "5000"],
        correct: 2,
        explanation: "Good! 'Mil' is the number 1000.",
    },
    Entry {
        prompt: "How do you say 'first' in Spanish?",
        options: ["One", "First", "First (masculine)", "First (feminine)"],
        correct: 1,
        explanation: "Excellent! 'Primero' means 'first'.",
    },
    Entry {
        prompt: "What does 'segundo' mean?",
        options: ["Second", "Third", "Fourth", "Fifth"],
        correct: 0,
        explanation: "Correct! 'Segundo' means 'second'.",
    },
];

const COLORS: &[Entry] = &[
    Entry {
        prompt: "How do you say 'red' in Spanish?",
        options: ["Blue", "Red", "Green", "Yellow"],
        correct: 1,
        explanation: "Correct! 'Rojo' is the color red.",
    },
    Entry {
        prompt: "What color is 'azul'?",
        options: ["Red", "Blue", "Green", "Yellow"],
        correct: 1,
        explanation: "Excellent! 'Azul' is the color blue.",
    },
    Entry {
        prompt: "How do you say 'green' in Spanish?",
        options: ["Red", "Blue", "Green", "White"],
        correct: 2,
        explanation: "Perfect! 'Verde' is the color green.",
    },
    Entry {
        prompt: "What color is 'amarillo'?",
        options: ["Red", "Blue", "Yellow", "Orange"],
        correct: 2,
        explanation: "Good! 'Amarillo' is the color yellow.",
    },
    Entry {
        prompt: "How do you say 'white' in Spanish?",
        options: ["Black", "White", "Gray", "Brown"],
        correct: 1,
        explanation: "Correct! 'Blanco' is the color white.",
    },
    Entry {
        prompt: "What color is 'negro'?",
        options: ["White", "Black", "Gray", "Brown"],
        correct: 1,
        explanation: "Excellent! 'Negro' is the color black.",
    },
    Entry {
        prompt: "How do you say 'pink' in Spanish?",
        options: ["Pink", "Purple", "Orange", "Light blue"],
        correct: 0,
        explanation: "Very good! 'Rosado' or 'rosa' is the color pink.",
    },
    Entry {
        prompt: "What color is 'morado'?",
        options: ["Pink", "Purple", "Orange", "Brown"],
        correct: 1,
        explanation: "Correct! 'Morado' is the color purple.",
    },
    Entry {
        prompt: "How do you say 'orange' in Spanish?",
        options: ["Pink", "Orange", "Yellow", "Red"],
        correct: 1,
        explanation: "Perfect! 'Naranja' is the color orange.",
    },
    Entry {
        prompt: "What does 'marrón' mean?",
        options: ["Gray", "Brown", "Beige", "Gold"],
        correct: 1,
        explanation: "Good! 'Marrón' is the color brown.",
    },
    Entry {
        prompt: "How do you say 'light blue' in Spanish?",
        options: ["Dark blue", "Light blue", "Navy blue", "Turquoise"],
        correct: 1,
        explanation: "Excellent! 'Celeste' is light blue.",
    },
    Entry {
        prompt: "What color is 'dorado'?",
        options: ["Silver", "Gold", "Bronze", "Copper"],
        correct: 1,
        explanation: "Correct! 'Dorado' is the color gold.",
    },
];

const EXAM: &[Entry] = &[
    Entry {
        prompt: "What is the national dish of Mexico?",
        options: ["Tacos al pastor", "Mole poblano", "Chiles en nogada", "Pozole"],
        correct: 2,
        explanation: "Chiles en nogada are considered the national dish because of their patriotic colors (green, white, and red)",
    },
    Entry {
        prompt: "In what year did the Mexican Revolution begin?",
        options: ["1905", "1910", "1915", "1920"],
        correct: 1,
        explanation: "The Mexican Revolution began in 1910 against the government of Porfirio Díaz",
    },
    Entry {
        prompt: "What does 'fiesta' mean in Spanish?",
        options: ["Food", "Party", "Dance", "Music"],
        correct: 1,
        explanation: "'Fiesta' means 'party' in English - a celebration or festive gathering",
    },
    Entry {
        prompt: "What is the most characteristic musical instrument of Mexico?",
        options: ["Guitar", "Marimba", "Maracas", "Mariachi"],
        correct: 3,
        explanation: "The mariachi is the most representative musical group of Mexico",
    },
    Entry {
        prompt: "Which city is known as 'The City of Palaces'?",
        options: ["Guadalajara", "Monterrey", "Mexico City", "Puebla"],
        correct: 2,
        explanation: "Mexico City is known as 'The City of Palaces' because of its architecture",
    },
    Entry {
        prompt: "How do you say 'thank you' in Spanish?",
        options: ["Please", "Thank you", "You're welcome", "Hello"],
        correct: 1,
        explanation: "'Thank you' is the way to say 'thank you' in Spanish",
    },
    Entry {
        prompt: "Which Mexican artist painted 'The Two Fridas'?",
        options: ["Diego Rivera", "Frida Kahlo", "David Alfaro Siqueiros", "José Clemente Orozco"],
        correct: 1,
        explanation: "Frida Kahlo painted 'The Two Fridas' in 1939, one of her most famous works",
    },
    Entry {
        prompt: "What is the traditional Mexican drink made from agave?",
        options: ["Mezcal", "Pulque", "Tequila", "All of the above"],
        correct: 3,
        explanation: "All of these drinks are traditional Mexican drinks made from different types of agave",
    },
    Entry {
        prompt: "What does the Day of the Dead celebrate in Mexico?",
        options: ["Independence", "The deceased", "The revolution", "Spring"],
        correct: 1,
        explanation: "The Day of the Dead is a tradition to honor and remember deceased loved ones",
    },
    Entry {
        prompt: "How do you say 'beautiful' in Spanish?",
        options: ["Bonito", "Hermoso", "Guapo", "Todos los antes"],
        correct: 3,
        explanation: "All of these words can mean 'beautiful' depending on the context",
    },
    Entry {
        prompt: "Which pre-Hispanic pyramid is near Mexico City?",
        options: ["Chichen Itza", "Teotihuacan", "Palenque", "Monte Alban"],
        correct: 1,
        explanation: "Teotihuacan, with the Pyramids of the Sun and the Moon, is 40 km from Mexico City",
    },
    Entry {
        prompt: "What is the traditional dance of Veracruz?",
        options: ["Jarabe Tapatío", "Danza de los Viejitos", "Son Jarocho", "Flor de Piña"],
        correct: 2,
        explanation: "Son Jarocho is the traditional dance of the state of Veracruz",
    },
    Entry {
        prompt: "What does 'mañana' mean in Spanish?",
        options: ["Morning", "Tomorrow", "Afternoon", "Evening"],
        correct: 1,
        explanation: "'Mañana' means 'tomorrow', while 'la mañana' means 'morning'",
    },
    Entry {
        prompt: "Who was the last Aztec emperor?",
        options: ["Moctezuma I", "Cuauhtémoc", "Moctezuma II", "Itzcóatl"],
        correct: 1,
        explanation: "Cuauhtémoc was the last Mexica tlatoani, executed by the Spanish in 1525",
    },
    Entry {
        prompt: "Which Mexican state is famous for its silver production?",
        options: ["Guanajuato", "Zacatecas", "Taxco", "All of the above"],
        correct: 3,
        explanation: "All of these states are famous for their silver production and craftsmanship",
    },
];

const QUICK_QUIZ: &[Entry] = &[
    Entry {
        prompt: "What is the capital of Mexico?",
        options: ["Guadalajara", "Mexico City", "Monterrey", "Cancun"],
        correct: 1,
        explanation: "Correct! Mexico City is the capital and largest city of Mexico.",
    },
    Entry {
        prompt: "What does 'Day of the Dead' mean?",
        options: ["Day of the Dead", "Birthday", "New Year", "Christmas"],
        correct: 0,
        explanation: "That's right! Day of the Dead is a Mexican tradition that celebrates the lives of the deceased.",
    },
    Entry {
        prompt: "What is the most famous traditional Mexican dish?",
        options: ["Pizza", "Sushi", "Tacos", "Pasta"],
        correct: 2,
        explanation: "Perfect! Tacos are one of the most iconic dishes in Mexico.",
    },
    Entry {
        prompt: "What colors does the Mexican flag have?",
        options: ["Red, white, and blue", "Green, white, and red", "Yellow and black", "Blue and white"],
        correct: 1,
        explanation: "Correct! The Mexican flag has three colors: green, white, and red.",
    },
    Entry {
        prompt: "What is the currency of Mexico?",
        options: ["Dollar", "Euro", "Peso", "Real"],
        correct: 2,
        explanation: "Good! The Mexican peso is the official currency of Mexico.",
    },
];

const TACO_TRIVIA: &[Entry] = &[
    Entry {
        prompt: "Where did tacos originate?",
        options: ["Spain", "Mexico", "United States", "Cuba"],
        correct: 1,
        explanation: "Correct! Tacos originated in Mexico, with centuries of history.",
    },
    Entry {
        prompt: "What does 'al pastor' mean?",
        options: ["With vegetables", "Shepherd style", "Spicy", "With cheese"],
        correct: 1,
        explanation: "Exactly! 'Al pastor' means 'in the shepherd style', inspired by Lebanese shawarma.",
    },
    Entry {
        prompt: "What is the main ingredient in fish tacos?",
        options: ["Chicken", "Beef", "Fish", "Pork"],
        correct: 2,
        explanation: "Perfect! Fish tacos use battered and fried fish.",
    },
    Entry {
        prompt: "What day is Taco Day celebrated in some places?",
        options: ["October 4", "May 5", "January 1", "December 31"],
        correct: 0,
        explanation: "Good! October 4th is National Taco Day in Mexico.",
    },
];
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    #[test]
    fn every_bank_is_valid() {
        assert_eq!(lessons().unwrap().len(), 12);
        for lesson in lessons().unwrap() {
            assert!(!lesson_questions(lesson.id()).unwrap().is_empty());
        }
        assert_eq!(quick_quiz_questions().unwrap().len(), 5);
        assert_eq!(taco_trivia_questions().unwrap().len(), 4);
        assert_eq!(exam_questions().unwrap().len(), 15);
    }

    #[test]
    fn exam_has_no_duplicate_prompts() {
        let exam = exam_questions().unwrap();
        let prompts: BTreeSet<&str> = exam.iter().map(Question::prompt).collect();
        assert_eq!(prompts.len(), exam.len());
    }

    #[test]
    fn path_covers_every_category() {
        let lessons = lessons().unwrap();
        for category in Category::ALL {
            assert!(lessons.iter().any(|l| l.category() == category));
        }
        assert!(lesson(LessonId::new(12)).unwrap().unwrap().is_locked());
        assert!(lesson(LessonId::new(99)).unwrap().is_none());
    }

    #[test]
    fn flag_game_has_distinct_answers_and_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = flag_questions(&mut rng).unwrap();
        assert_eq!(questions.len(), FLAG_QUESTIONS_PER_GAME);

        let answers: BTreeSet<&str> = questions.iter().map(Question::correct_option).collect();
        assert_eq!(answers.len(), FLAG_QUESTIONS_PER_GAME);
        for question in &questions {
            let options: BTreeSet<&String> = question.options().iter().collect();
            assert_eq!(options.len(), FLAG_OPTIONS);
            let (emoji, _) = FLAGS
                .iter()
                .find(|(_, country)| *country == question.correct_option())
                .unwrap();
            assert!(question.prompt().ends_with(emoji));
        }
    }

    #[test]
    fn memory_board_holds_every_pair_twice() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = memory_board(&mut rng).unwrap();
        assert_eq!(board.cards().len(), MEMORY_PAIRS.len() * 2);
        assert_eq!(board.max_score(), 600);
    }

    #[test]
    fn word_builder_tiles_are_a_scramble() {
        let mut rng = StdRng::seed_from_u64(11);
        let builder = word_builder(&mut rng).unwrap();
        let mut tiles = builder.tiles().to_vec();
        tiles.sort_unstable();
        let mut expected: Vec<char> = "HOLA".chars().collect();
        expected.sort_unstable();
        assert_eq!(tiles, expected);
        assert_eq!(builder.total(), 15);
    }
}
