mod audio;
mod catalog;
mod config;
mod error;
mod quiz;
mod render;
mod safari;
mod sound;

use std::sync::Arc;

use dotenv::dotenv;
use log::{debug, info};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, ParseMode},
};

use catalog::{Animal, AnimalId, Catalog, CatalogEngine, Criterion, FilterField, FilterState};
use config::Config;
use error::QuizError;
use quiz::{Advance, QuestionBank, QuizEngine, QuizState};
use render::DetailTab;
use safari::{Expedition, SafariTour};
use sound::{ChatSpeaker, SoundDesk};

type WildlifeDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type StateStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    MainMenu,
    Browsing {
        engine: CatalogEngine,
    },
    ChoosingFilter {
        engine: CatalogEngine,
        field: FilterField,
    },
    Searching {
        engine: CatalogEngine,
    },
    Viewing {
        animal: AnimalId,
        back: Box<State>,
    },
    Quiz {
        quiz: QuizEngine,
    },
    Safari {
        expedition: Expedition,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting wildlife bot...");

    let config = Arc::new(Config::from_env());
    debug!("{:?}", config);

    let loaded = catalog::loader::load(&config.catalog_path).await;
    info!(
        "Catalog ready: {} animals ({:?})",
        loaded.catalog.len(),
        loaded.source
    );
    let catalog = Arc::new(loaded.catalog);
    let bank = Arc::new(QuestionBank::builtin());
    let tour = Arc::new(SafariTour::builtin());

    let bot = Bot::from_env();
    let sound = {
        let bot = bot.clone();
        let assets_dir = config.assets_dir.clone();
        Arc::new(SoundDesk::new(config.audio_auto_stop, move |chat| {
            ChatSpeaker::new(bot.clone(), chat, assets_dir.clone())
        }))
    };
    let storage: StateStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::filter(|msg: Message| is_menu_request(&msg)).endpoint(main_menu))
            .branch(
                dptree::filter_map(|msg: Message| msg.text().and_then(render::parse_animal_command))
                    .endpoint(open_animal),
            )
            .branch(dptree::case![State::Start].endpoint(main_menu))
            .branch(dptree::case![State::MainMenu].endpoint(receive_menu_choice))
            .branch(dptree::case![State::Browsing { engine }].endpoint(browse))
            .branch(dptree::case![State::ChoosingFilter { engine, field }].endpoint(choose_filter))
            .branch(dptree::case![State::Searching { engine }].endpoint(search))
            .branch(dptree::case![State::Viewing { animal, back }].endpoint(view_animal))
            .branch(dptree::case![State::Quiz { quiz }].endpoint(play_quiz))
            .branch(dptree::case![State::Safari { expedition }].endpoint(safari)),
    )
    .dependencies(dptree::deps![storage, catalog, bank, tour, sound, config])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const MENU: &str = "🏠 Menu";
const BROWSE: &str = "🐾 Browse animals";
const SEARCH: &str = "🔍 Search";
const QUIZ: &str = "❓ Quiz";
const SAFARI: &str = "🧭 Virtual safari";
const SOUND: &str = "🔊 Sound on/off";

const LOAD_MORE: &str = "⬇️ Load more";
const HABITAT: &str = "🏠 Habitat";
const DIET: &str = "🍽 Diet";
const STATUS: &str = "🛡 Status";
const CLEAR_FILTERS: &str = "♻️ Clear filters";
const CLEAR_SEARCH: &str = "✖️ Clear search";

const SHARE: &str = "📤 Share";
const PLAY_SOUND: &str = "🔈 Play sound";
const HOLOGRAM: &str = "🧊 3D hologram";
const BACK: &str = "⬅️ Back";

const PREVIOUS: &str = "⬅️ Previous";
const NEXT: &str = "Next ➡️";
const FINISH: &str = "🏁 Finish Quiz";
const TRY_AGAIN: &str = "🔁 Try Again";
const NEW_QUIZ: &str = "📋 New Quiz";

const PROGRESS: &str = "📈 Progress";

const NOT_AVAILABLE: &str = "Animal information not available.";
const PICK_AN_OPTION: &str = "Please pick one of the options";

fn is_menu_request(msg: &Message) -> bool {
    matches!(msg.text(), Some(MENU) | Some("/menu") | Some("/start"))
}

fn keyboard(rows: Vec<Vec<String>>) -> KeyboardMarkup {
    KeyboardMarkup::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>(),
    )
}

fn row(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

fn menu_keyboard() -> KeyboardMarkup {
    keyboard(vec![row(&[BROWSE, SEARCH]), row(&[QUIZ, SAFARI]), row(&[SOUND])])
}

fn browse_keyboard(engine: &CatalogEngine) -> KeyboardMarkup {
    let mut first = Vec::new();
    if engine.has_more() {
        first.push(LOAD_MORE.to_string());
    }
    first.push(SEARCH.to_string());
    keyboard(vec![
        first,
        row(&[HABITAT, DIET, STATUS]),
        row(&[CLEAR_FILTERS, MENU]),
    ])
}

fn filter_keyboard(catalog: &Catalog, field: FilterField) -> KeyboardMarkup {
    let mut values = vec![catalog::filter::ALL.to_string()];
    values.extend(catalog.observed(field).into_iter().map(str::to_string));
    keyboard(values.chunks(3).map(|chunk| chunk.to_vec()).collect())
}

fn detail_keyboard() -> KeyboardMarkup {
    let tabs: Vec<String> = DetailTab::ALL.iter().map(|t| t.label().to_string()).collect();
    keyboard(vec![
        tabs[..3].to_vec(),
        tabs[3..].to_vec(),
        row(&[SHARE, PLAY_SOUND, HOLOGRAM]),
        row(&[BACK, MENU]),
    ])
}

fn categories_keyboard(bank: &QuestionBank) -> KeyboardMarkup {
    keyboard(
        bank.categories()
            .iter()
            .map(|c| vec![c.title.clone()])
            .chain(std::iter::once(row(&[MENU])))
            .collect(),
    )
}

fn question_keyboard(quiz: &QuizEngine) -> KeyboardMarkup {
    let Some(attempt) = quiz.in_progress() else {
        return keyboard(vec![row(&[NEW_QUIZ, MENU])]);
    };
    let letters = (0..attempt.current_question().options.len())
        .map(render::option_letter)
        .collect();
    let mut navigation = Vec::new();
    if attempt.current_index() > 0 {
        navigation.push(PREVIOUS.to_string());
    }
    navigation.push(if attempt.is_last() { FINISH } else { NEXT }.to_string());
    keyboard(vec![letters, navigation, row(&[NEW_QUIZ, MENU])])
}

fn results_keyboard() -> KeyboardMarkup {
    keyboard(vec![row(&[TRY_AGAIN, NEW_QUIZ]), row(&[MENU])])
}

fn safari_keyboard(tour: &SafariTour, expedition: &Expedition) -> KeyboardMarkup {
    let mut rows: Vec<Vec<String>> = Vec::new();
    if let Some(scene) = expedition.current(tour) {
        rows.extend(scene.hotspots.iter().map(|h| vec![h.text.to_string()]));
    }
    rows.extend(
        tour.scenes()
            .chunks(2)
            .map(|pair| pair.iter().map(|s| s.title.to_string()).collect()),
    );
    rows.push(row(&[PROGRESS, SOUND, MENU]));
    keyboard(rows)
}

async fn send_html(bot: &Bot, chat: ChatId, text: String, markup: KeyboardMarkup) -> HandlerResult {
    bot.send_message(chat, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup)
        .await?;
    Ok(())
}

async fn notify(bot: &Bot, chat: ChatId, text: &str) -> HandlerResult {
    bot.send_message(chat, text).await?;
    Ok(())
}

const GREETING_TEXT: &str = "Welcome to BioRelm! Explore the animal catalog, take a virtual safari or test yourself with a quiz.";
async fn main_menu(
    bot: Bot,
    dialogue: WildlifeDialogue,
    msg: Message,
    sound: Arc<SoundDesk>,
) -> HandlerResult {
    sound.stop(msg.chat.id);
    send_html(&bot, msg.chat.id, GREETING_TEXT.to_string(), menu_keyboard()).await?;
    dialogue.update(State::MainMenu).await?;
    Ok(())
}

async fn toggle_sound(bot: &Bot, chat: ChatId, sound: &SoundDesk) -> HandlerResult {
    let text = if sound.toggle(chat) {
        "🔊 Sound on"
    } else {
        "🔇 Sound off"
    };
    notify(bot, chat, text).await
}

/// Sends the visible cards from `from` onwards; the keyboard rides on the last message
async fn show_catalog(bot: &Bot, chat: ChatId, engine: &CatalogEngine, from: usize) -> HandlerResult {
    let mut messages = render::catalog_messages(engine, from);
    let last = messages.pop().unwrap_or_default();
    for text in messages {
        bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;
    }
    send_html(bot, chat, last, browse_keyboard(engine)).await
}

async fn show_quiz(bot: &Bot, chat: ChatId, quiz: &QuizEngine) -> HandlerResult {
    match quiz.state() {
        QuizState::NotStarted => {
            send_html(
                bot,
                chat,
                render::categories(quiz.bank().categories()),
                categories_keyboard(quiz.bank()),
            )
            .await
        }
        QuizState::InProgress(attempt) => {
            let feedback = quiz.feedback();
            send_html(
                bot,
                chat,
                render::question(attempt, feedback.as_ref()),
                question_keyboard(quiz),
            )
            .await
        }
        QuizState::Completed(_) => match quiz.summary() {
            Ok(summary) => send_html(bot, chat, render::summary(&summary), results_keyboard()).await,
            Err(_) => Ok(()),
        },
    }
}

async fn show_scene(
    bot: &Bot,
    chat: ChatId,
    tour: &SafariTour,
    expedition: &Expedition,
    sound: &SoundDesk,
) -> HandlerResult {
    if let Some(scene) = expedition.current(tour) {
        send_html(
            bot,
            chat,
            render::scene(scene, sound.is_enabled(chat)),
            safari_keyboard(tour, expedition),
        )
        .await?;
    }
    Ok(())
}

/// Re-sends the screen a state stands for, after coming back to it
async fn resume(
    bot: &Bot,
    chat: ChatId,
    state: &State,
    tour: &SafariTour,
    sound: &SoundDesk,
) -> HandlerResult {
    match state {
        State::Browsing { engine }
        | State::ChoosingFilter { engine, .. }
        | State::Searching { engine } => show_catalog(bot, chat, engine, 0).await,
        State::Quiz { quiz } => show_quiz(bot, chat, quiz).await,
        State::Safari { expedition } => show_scene(bot, chat, tour, expedition, sound).await,
        State::Start | State::MainMenu | State::Viewing { .. } => {
            send_html(bot, chat, GREETING_TEXT.to_string(), menu_keyboard()).await
        }
    }
}

async fn receive_menu_choice(
    bot: Bot,
    dialogue: WildlifeDialogue,
    msg: Message,
    catalog: Arc<Catalog>,
    bank: Arc<QuestionBank>,
    tour: Arc<SafariTour>,
    sound: Arc<SoundDesk>,
    config: Arc<Config>,
) -> HandlerResult {
    let chat = msg.chat.id;
    match msg.text() {
        Some(BROWSE) => {
            let engine = CatalogEngine::new(catalog, config.page_size);
            show_catalog(&bot, chat, &engine, 0).await?;
            dialogue.update(State::Browsing { engine }).await?;
        }
        Some(SEARCH) => {
            let engine = CatalogEngine::new(catalog, config.page_size);
            ask_search(&bot, chat).await?;
            dialogue.update(State::Searching { engine }).await?;
        }
        Some(QUIZ) => {
            let quiz = QuizEngine::new(bank);
            show_quiz(&bot, chat, &quiz).await?;
            dialogue.update(State::Quiz { quiz }).await?;
        }
        Some(SAFARI) => {
            let expedition = Expedition::default();
            let entry = {
                let mut rng = rand::thread_rng();
                expedition.enter(&tour, &mut rng)
            };
            enter_scene(&bot, chat, &tour, &expedition, entry, &sound, &config).await?;
            dialogue.update(State::Safari { expedition }).await?;
        }
        Some(SOUND) => toggle_sound(&bot, chat, &sound).await?,
        _ => notify(&bot, chat, PICK_AN_OPTION).await?,
    }
    Ok(())
}

async fn ask_search(bot: &Bot, chat: ChatId) -> HandlerResult {
    send_html(
        bot,
        chat,
        "Type a name, scientific name or any word from the description.".to_string(),
        keyboard(vec![row(&[CLEAR_SEARCH, MENU])]),
    )
    .await
}

async fn browse(
    bot: Bot,
    dialogue: WildlifeDialogue,
    mut engine: CatalogEngine,
    msg: Message,
) -> HandlerResult {
    let chat = msg.chat.id;
    let field = match msg.text() {
        Some(LOAD_MORE) => {
            let shown = engine.visible().len();
            if !engine.load_more() {
                return notify(&bot, chat, "All matching animals are already shown.").await;
            }
            show_catalog(&bot, chat, &engine, shown).await?;
            dialogue.update(State::Browsing { engine }).await?;
            return Ok(());
        }
        Some(SEARCH) => {
            ask_search(&bot, chat).await?;
            dialogue.update(State::Searching { engine }).await?;
            return Ok(());
        }
        Some(CLEAR_FILTERS) => {
            engine.apply_filter(FilterState::default());
            show_catalog(&bot, chat, &engine, 0).await?;
            dialogue.update(State::Browsing { engine }).await?;
            return Ok(());
        }
        Some(HABITAT) => FilterField::Habitat,
        Some(DIET) => FilterField::Diet,
        Some(STATUS) => FilterField::Status,
        Some(text) => {
            // free text in the catalog is a search
            let filter = FilterState {
                search_text: text.to_string(),
                ..engine.filter().clone()
            };
            engine.apply_filter(filter);
            show_catalog(&bot, chat, &engine, 0).await?;
            dialogue.update(State::Browsing { engine }).await?;
            return Ok(());
        }
        None => return notify(&bot, chat, PICK_AN_OPTION).await,
    };

    let current = engine.filter().criterion(field).to_string();
    send_html(
        &bot,
        chat,
        format!("{} filter (currently <b>{}</b>):", field.label(), teloxide::utils::html::escape(&current)),
        filter_keyboard(engine.catalog(), field),
    )
    .await?;
    dialogue.update(State::ChoosingFilter { engine, field }).await?;
    Ok(())
}

async fn choose_filter(
    bot: Bot,
    dialogue: WildlifeDialogue,
    (mut engine, field): (CatalogEngine, FilterField),
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return notify(&bot, msg.chat.id, PICK_AN_OPTION).await;
    };
    let filter = engine.filter().with(field, Criterion::parse(text));
    engine.apply_filter(filter);
    show_catalog(&bot, msg.chat.id, &engine, 0).await?;
    dialogue.update(State::Browsing { engine }).await?;
    Ok(())
}

async fn search(
    bot: Bot,
    dialogue: WildlifeDialogue,
    mut engine: CatalogEngine,
    msg: Message,
) -> HandlerResult {
    let search_text = match msg.text() {
        Some(CLEAR_SEARCH) => String::new(),
        Some(text) => text.to_string(),
        None => return notify(&bot, msg.chat.id, "Please type the search text").await,
    };
    let filter = FilterState {
        search_text,
        ..engine.filter().clone()
    };
    engine.apply_filter(filter);
    show_catalog(&bot, msg.chat.id, &engine, 0).await?;
    dialogue.update(State::Browsing { engine }).await?;
    Ok(())
}

async fn show_animal(
    bot: &Bot,
    chat: ChatId,
    animal: &Animal,
    catalog: &Catalog,
    sound: &SoundDesk,
    config: &Config,
) -> HandlerResult {
    sound.stop(chat);

    let caption = render::detail_caption(animal);
    if let Some(photo) = local_asset(config, &animal.image).await {
        bot.send_photo(chat, InputFile::file(photo))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .reply_markup(detail_keyboard())
            .await?;
    } else {
        send_html(bot, chat, caption, detail_keyboard()).await?;
    }

    let mut text = render::detail_tab(animal, DetailTab::Description);
    let related = render::related(&catalog.related(animal));
    if !related.is_empty() {
        text.push_str("\n\n");
        text.push_str(&related);
    }
    bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;

    if let Some(audio) = &animal.audio {
        sound.play(chat, audio);
    }
    Ok(())
}

async fn open_animal(
    bot: Bot,
    dialogue: WildlifeDialogue,
    id: AnimalId,
    state: State,
    msg: Message,
    catalog: Arc<Catalog>,
    sound: Arc<SoundDesk>,
    config: Arc<Config>,
) -> HandlerResult {
    let chat = msg.chat.id;
    let animal = match catalog.get_by_id(&id) {
        Ok(animal) => animal,
        Err(e) => {
            debug!("{}", e);
            return notify(&bot, chat, NOT_AVAILABLE).await;
        }
    };

    show_animal(&bot, chat, animal, &catalog, &sound, &config).await?;

    let back = match state {
        State::Viewing { back, .. } => back,
        other => Box::new(other),
    };
    dialogue.update(State::Viewing { animal: id, back }).await?;
    Ok(())
}

async fn view_animal(
    bot: Bot,
    dialogue: WildlifeDialogue,
    (id, back): (AnimalId, Box<State>),
    msg: Message,
    catalog: Arc<Catalog>,
    tour: Arc<SafariTour>,
    sound: Arc<SoundDesk>,
) -> HandlerResult {
    let chat = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    if text == BACK {
        sound.stop(chat);
        resume(&bot, chat, &back, &tour, &sound).await?;
        dialogue.update(*back).await?;
        return Ok(());
    }

    let animal = match catalog.get_by_id(&id) {
        Ok(animal) => animal,
        Err(e) => {
            debug!("{}", e);
            return notify(&bot, chat, NOT_AVAILABLE).await;
        }
    };

    if let Some(tab) = DetailTab::from_label(text) {
        bot.send_message(chat, render::detail_tab(animal, tab))
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    match text {
        SHARE => notify(&bot, chat, &render::share_text(animal)).await?,
        PLAY_SOUND => match &animal.audio {
            Some(audio) => sound.play_now(chat, audio),
            None => notify(&bot, chat, "🔇 Sound not available").await?,
        },
        HOLOGRAM if animal.hologram => {
            notify(&bot, chat, &format!("Now viewing {} in 3D hologram mode", animal.name)).await?
        }
        HOLOGRAM => notify(&bot, chat, "3D hologram not available for this animal").await?,
        _ => notify(&bot, chat, PICK_AN_OPTION).await?,
    }
    Ok(())
}

async fn play_quiz(
    bot: Bot,
    dialogue: WildlifeDialogue,
    mut quiz: QuizEngine,
    msg: Message,
) -> HandlerResult {
    let chat = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    let result = match text {
        NEW_QUIZ => {
            quiz.reset();
            Ok(())
        }
        TRY_AGAIN => quiz.restart(),
        NEXT | FINISH => quiz.next().map(|advance| {
            if let Advance::Completed(summary) = advance {
                info!(
                    "Chat {} finished '{}' with {}%",
                    chat, summary.category_id, summary.percentage
                );
            }
        }),
        PREVIOUS => quiz.previous().map(|_| ()),
        _ if matches!(quiz.state(), QuizState::NotStarted) => {
            match quiz.bank().find_by_title(text) {
                Some(category) => quiz.select_category(&category.id),
                None => Err(QuizError::UnknownCategory(text.to_string())),
            }
        }
        _ => match render::option_index(text) {
            Some(option) if quiz.in_progress().is_some() => quiz.select_answer(option).map(|_| ()),
            _ => return notify(&bot, chat, PICK_AN_OPTION).await,
        },
    };

    match result {
        Ok(()) => show_quiz(&bot, chat, &quiz).await?,
        Err(e) => {
            debug!("Quiz input rejected: {}", e);
            let text = match e {
                QuizError::MustAnswerFirst => e.to_string(),
                QuizError::AlreadyAnswered(_) => "You have already answered this question.".to_string(),
                QuizError::AtFirstQuestion => "This is the first question.".to_string(),
                QuizError::UnknownCategory(_) => "Please choose a category".to_string(),
                _ => PICK_AN_OPTION.to_string(),
            };
            notify(&bot, chat, &text).await?;
        }
    }

    dialogue.update(State::Quiz { quiz }).await?;
    Ok(())
}

/// Asset path under the configured directory, if the file is actually there
async fn local_asset(config: &Config, name: &str) -> Option<std::path::PathBuf> {
    let path = config.assets_dir.join(name);
    tokio::fs::metadata(&path).await.ok().map(|_| path)
}

async fn enter_scene(
    bot: &Bot,
    chat: ChatId,
    tour: &SafariTour,
    expedition: &Expedition,
    entry: Option<safari::SceneEntry>,
    sound: &SoundDesk,
    config: &Config,
) -> HandlerResult {
    sound.stop(chat);
    if let Some(scene) = expedition.current(tour) {
        if let Some(panorama) = local_asset(config, scene.panorama).await {
            bot.send_photo(chat, InputFile::file(panorama)).await?;
        }
    }
    show_scene(bot, chat, tour, expedition, sound).await?;
    if let Some(entry) = entry {
        bot.send_message(chat, render::scene_entry(&entry))
            .parse_mode(ParseMode::Html)
            .await?;
    }
    if let Some(scene) = expedition.current(tour) {
        sound.play(chat, scene.ambient_audio);
    }
    Ok(())
}

async fn safari(
    bot: Bot,
    dialogue: WildlifeDialogue,
    mut expedition: Expedition,
    msg: Message,
    tour: Arc<SafariTour>,
    catalog: Arc<Catalog>,
    sound: Arc<SoundDesk>,
    config: Arc<Config>,
) -> HandlerResult {
    let chat = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    if text == PROGRESS {
        let progress = expedition.progress(catalog.len());
        return notify(&bot, chat, &render::safari_progress(&progress)).await;
    }

    if text == SOUND {
        toggle_sound(&bot, chat, &sound).await?;
        if let Some(scene) = expedition.current(&tour) {
            sound.play(chat, scene.ambient_audio);
        }
        return Ok(());
    }

    if let Some(scene) = tour.scene_by_title(text) {
        let entry = {
            let mut rng = rand::thread_rng();
            expedition.switch(&tour, scene.id, &mut rng)
        };
        if entry.is_none() {
            return notify(&bot, chat, "You are already exploring this scene.").await;
        }
        enter_scene(&bot, chat, &tour, &expedition, entry, &sound, &config).await?;
        dialogue.update(State::Safari { expedition }).await?;
        return Ok(());
    }

    let Some(hotspot) = expedition.current(&tour).and_then(|scene| scene.hotspot(text)).copied() else {
        return notify(&bot, chat, PICK_AN_OPTION).await;
    };

    match hotspot.animal_id() {
        Some(id) => {
            let animal = match catalog.get_by_id(&id) {
                Ok(animal) => animal,
                Err(e) => {
                    debug!("{}", e);
                    return notify(&bot, chat, NOT_AVAILABLE).await;
                }
            };
            if expedition.record_sighting(id.clone()) {
                info!("Chat {} spotted {} ({} sightings)", chat, animal.name, expedition.sightings().len());
            }
            notify(&bot, chat, "🎯 Wildlife Spotted!").await?;
            show_animal(&bot, chat, animal, &catalog, &sound, &config).await?;
            dialogue
                .update(State::Viewing {
                    animal: id,
                    back: Box::new(State::Safari { expedition }),
                })
                .await?;
        }
        None => {
            let Some(scene) = expedition.current(&tour) else {
                return Ok(());
            };
            let fact = {
                let mut rng = rand::thread_rng();
                tour.random_fact(&mut rng)
            };
            send_html(
                &bot,
                chat,
                render::habitat_feature(scene, hotspot.text, fact),
                safari_keyboard(&tour, &expedition),
            )
            .await?;
        }
    }
    Ok(())
}
