use std::sync::Arc;

use almanac_core::{
    BadgeTone, Direction, EventQuery, HistoryWidget, HttpHistoryApi, LoadOutcome, Panel,
    RenderedEvent, WidgetConfig,
    format::{EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE},
    format_share,
};
use iced::widget::{button, column, row, text};
use iced::{Color, Element, Subscription, Task};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WidgetConfig::from_env()?;
    let api = HttpHistoryApi::new(&config)?;
    let widget = Arc::new(HistoryWidget::new(api, config.base_url.clone()));

    iced::application(
        move || App::new(Arc::clone(&widget), config.clone()),
        App::update,
        App::view,
    )
    .title("Almanac")
    .subscription(App::subscription)
    .run()?;

    Ok(())
}

struct App {
    widget: Arc<HistoryWidget<HttpHistoryApi>>,
    config: WidgetConfig,
    share_text: Option<String>,
    show_history_link: bool,
}

#[derive(Debug, Clone)]
enum Message {
    Refresh,
    Random,
    Navigate(Direction),
    AutoRefresh,
    Loaded(LoadOutcome),
    Like,
    Share,
    ViewMore,
}

impl App {
    fn new(
        widget: Arc<HistoryWidget<HttpHistoryApi>>,
        config: WidgetConfig,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            widget,
            config,
            share_text: None,
            show_history_link: false,
        };
        let task = app.load(EventQuery::Today);
        (app, task)
    }

    fn load(&mut self, query: EventQuery) -> Task<Message> {
        self.share_text = None;
        match self.widget.start_load(query) {
            Some(pending) => Task::perform(pending, Message::Loaded),
            None => Task::none(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh | Message::AutoRefresh => return self.load(EventQuery::Today),
            Message::Random => return self.load(EventQuery::Random),
            Message::Navigate(direction) => {
                let query = self.widget.adjacent_query(direction);
                return self.load(query);
            }
            Message::Loaded(_) => {}
            Message::Like => {
                self.widget.like();
            }
            Message::Share => {
                self.share_text = self.widget.share().map(|payload| format_share(&payload));
            }
            Message::ViewMore => self.show_history_link = true,
        }
        Task::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.config.refresh_interval).map(|_| Message::AutoRefresh)
    }

    fn view(&self) -> Element<'_, Message> {
        let busy = self.widget.is_loading();

        let body: Element<'_, Message> = match self.widget.panel() {
            Panel::Loading => text(LOADING_MESSAGE).into(),
            Panel::Content(rendered) => self.event_view(&rendered),
            Panel::Error => column![
                text(ERROR_MESSAGE).color(Color::from_rgb8(0xdc, 0x35, 0x45)),
                button("Poskusi znova").on_press(Message::Refresh),
            ]
            .spacing(10)
            .into(),
            Panel::Empty => text(EMPTY_MESSAGE).into(),
        };

        let controls = row![
            button("Osveži").on_press_maybe((!busy).then_some(Message::Refresh)),
            button("Naključni").on_press_maybe((!busy).then_some(Message::Random)),
            button("◀").on_press_maybe((!busy).then_some(Message::Navigate(Direction::Previous))),
            button("▶").on_press_maybe((!busy).then_some(Message::Navigate(Direction::Next))),
            button("Več zgodovine").on_press(Message::ViewMore),
        ]
        .spacing(8);

        let mut content = column![text("Na današnji dan").size(24), body, controls]
            .padding(20)
            .spacing(14);

        if let Some(share) = &self.share_text {
            content = content.push(text(share.clone()).size(14));
        }
        if self.show_history_link {
            content = content.push(text(self.config.history_page_url().to_string()).size(14));
        }

        content.into()
    }

    fn event_view(&self, rendered: &RenderedEvent) -> Element<'_, Message> {
        let likes = self.widget.likes().unwrap_or(0);

        let mut details = column![
            row![
                text(rendered.year.clone()).size(32),
                text(rendered.category.label).color(tone_color(rendered.category.tone)),
            ]
            .spacing(12),
            text(rendered.title.clone()).size(20),
            text(rendered.description.clone()),
            text(format!("📍 {}", rendered.location)),
        ]
        .spacing(6);

        if let Some(people) = &rendered.people {
            details = details.push(text(format!("Osebe: {people}")));
        }
        if let Some(source) = &rendered.source {
            details = details.push(text(format!("Vir: {source}")).size(12));
        }
        if let Some(reference) = &rendered.reference_url {
            details = details.push(text(reference.clone()).size(12));
        }

        details
            .push(
                row![
                    button(text(format!("♥ {likes}"))).on_press(Message::Like),
                    button("Deli").on_press(Message::Share),
                ]
                .spacing(8),
            )
            .into()
    }
}

fn tone_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Primary => Color::from_rgb8(0x0d, 0x6e, 0xfd),
        BadgeTone::Secondary => Color::from_rgb8(0x6c, 0x75, 0x7d),
        BadgeTone::Success => Color::from_rgb8(0x19, 0x87, 0x54),
        BadgeTone::Danger => Color::from_rgb8(0xdc, 0x35, 0x45),
        BadgeTone::Warning => Color::from_rgb8(0xff, 0xc1, 0x07),
        BadgeTone::Info => Color::from_rgb8(0x0d, 0xca, 0xf0),
        BadgeTone::Dark => Color::from_rgb8(0x21, 0x25, 0x29),
    }
}
