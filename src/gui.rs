use iced::{
    alignment, executor,
    widget::{button, column, container, row, scrollable, text, text_input, Space},
    Application, Color, Command, Element, Length, Padding, Pixels, Settings, Theme as IcedTheme,
};
use std::sync::Arc;

use crate::brew::Brew;
use crate::controller::{AppState, Effect, SearchMode};
use crate::task::{self, TaskReport, TaskState};

mod styles;
mod theme;

use styles::{ListScrollableStyle, RoundedButtonStyle, RoundedContainerStyle, SearchInputStyle};
use theme::Theme as AppTheme;

const RADIUS: f32 = 8.0;

pub struct Flags {
    pub brew: Arc<dyn Brew>,
}

pub fn run(brew: Arc<dyn Brew>) -> iced::Result {
    tracing::debug!(brew = %brew.location(), "launching window");

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(600.0, 500.0),
            resizable: true,
            min_size: Some(iced::Size::new(400.0, 300.0)),
            ..Default::default()
        },
        default_text_size: Pixels(14.0),
        antialiasing: true,
        ..Settings::with_flags(Flags { brew })
    };

    BrewGui::run(settings)
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SubmitQuery,
    ModeSelected(SearchMode),
    PackageSelected(String),
    Install,
    Uninstall,
    Upgrade,
    InstalledLoaded(u64, Vec<String>),
    SearchLoaded(u64, Vec<String>),
    TaskFinished(TaskReport),
    ThemeToggled,
}

pub struct BrewGui {
    brew: Arc<dyn Brew>,
    state: AppState,
    theme: AppTheme,
}

impl BrewGui {
    /// Turns a controller effect into async work on the iced executor.
    fn perform(&self, effect: Effect) -> Command<Message> {
        let brew = Arc::clone(&self.brew);
        match effect {
            Effect::None => Command::none(),
            Effect::LoadInstalled { ticket } => Command::perform(task::load_installed(brew), move |packages| {
                Message::InstalledLoaded(ticket, packages)
            }),
            Effect::Search { ticket, query } => {
                tracing::info!(query = %query, "searching");
                Command::perform(task::load_search(brew, query), move |results| {
                    Message::SearchLoaded(ticket, results)
                })
            }
            Effect::RunTask(operation) => Command::perform(task::execute(brew, operation), Message::TaskFinished),
        }
    }
}

impl Application for BrewGui {
    type Message = Message;
    type Theme = IcedTheme;
    type Executor = executor::Default;
    type Flags = Flags;

    fn new(flags: Flags) -> (BrewGui, Command<Message>) {
        let (state, effect) = AppState::new();
        let gui = BrewGui {
            brew: flags.brew,
            state,
            theme: AppTheme::default(),
        };
        let cmd = gui.perform(effect);
        (gui, cmd)
    }

    fn title(&self) -> String {
        String::from("Brew GUI")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let effect = match message {
            Message::QueryChanged(query) => {
                self.state.set_query(query);
                Effect::None
            }
            Message::SubmitQuery => self.state.submit_query(),
            Message::ModeSelected(mode) => self.state.set_mode(mode),
            Message::PackageSelected(name) => {
                self.state.select(name);
                Effect::None
            }
            Message::Install => self.state.request_install(),
            Message::Uninstall => self.state.request_uninstall(),
            Message::Upgrade => self.state.request_upgrade(),
            Message::InstalledLoaded(ticket, packages) => {
                self.state.installed_loaded(ticket, packages);
                Effect::None
            }
            Message::SearchLoaded(ticket, results) => {
                self.state.search_loaded(ticket, results);
                Effect::None
            }
            Message::TaskFinished(report) => {
                self.state.task_finished(report);
                Effect::None
            }
            Message::ThemeToggled => {
                self.theme = self.theme.toggled();
                Effect::None
            }
        };
        self.perform(effect)
    }

    fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_search_bar(),
            self.view_list(),
            self.view_actions(),
            self.view_status(),
        ]
        .spacing(10)
        .padding(Padding::new(12.0));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(RoundedContainerStyle {
                radius: 0.0,
                background: self.theme.background(),
            })))
            .into()
    }

    fn theme(&self) -> IcedTheme {
        match self.theme {
            AppTheme::Light => IcedTheme::Light,
            AppTheme::Dark => IcedTheme::Dark,
        }
    }
}

impl BrewGui {
    fn styled_button<'a>(&self, label: &'a str, highlighted: bool) -> iced::widget::Button<'a, Message> {
        let theme = self.theme;
        button(text(label))
            .style(iced::theme::Button::Custom(Box::new(RoundedButtonStyle {
                highlighted,
                radius: RADIUS,
                accent: theme.accent(),
                background: theme.card_background(),
                text_color: theme.text(),
            })))
            .padding(Padding::new(8.0))
    }

    fn view_search_bar(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let mode = self.state.mode();
        let placeholder = match mode {
            SearchMode::Filter => "Filter installed packages...",
            SearchMode::Search => "Search all of Homebrew for new packages...",
        };

        row![
            text_input(placeholder, self.state.query())
                .on_input(Message::QueryChanged)
                .on_submit(Message::SubmitQuery)
                .padding(Padding::new(8.0))
                .width(Length::Fill)
                .style(iced::theme::TextInput::Custom(Box::new(SearchInputStyle {
                    radius: RADIUS,
                    accent: theme.accent(),
                    background: theme.card_background(),
                    text_color: theme.text(),
                }))),
            self.styled_button("Filter Installed", mode == SearchMode::Filter)
                .on_press(Message::ModeSelected(SearchMode::Filter)),
            self.styled_button("Search New", mode == SearchMode::Search)
                .on_press(Message::ModeSelected(SearchMode::Search)),
            self.styled_button(if theme == AppTheme::Dark { "Light" } else { "Dark" }, false)
                .on_press(Message::ThemeToggled),
        ]
        .spacing(8)
        .align_items(alignment::Alignment::Center)
        .into()
    }

    fn view_list(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let selected = self.state.selected();

        let rows: Vec<Element<Message>> = self
            .state
            .visible_entries()
            .map(|entry| {
                let is_selected = selected == Some(entry.name.as_str());
                button(text(&entry.name).width(Length::Fill))
                    .on_press(Message::PackageSelected(entry.name.clone()))
                    .width(Length::Fill)
                    .padding(Padding::new(6.0))
                    .style(iced::theme::Button::Custom(Box::new(RoundedButtonStyle {
                        highlighted: is_selected,
                        radius: RADIUS * 0.5,
                        accent: theme.accent(),
                        background: Color::TRANSPARENT,
                        text_color: theme.text(),
                    })))
                    .into()
            })
            .collect();

        if rows.is_empty() {
            let message = if self.state.entries().is_empty() {
                match self.state.mode() {
                    SearchMode::Filter => "No packages loaded",
                    SearchMode::Search => "Type a query and press Enter",
                }
            } else {
                "No installed packages match"
            };
            return container(text(message).style(iced::theme::Text::Color(theme.secondary_text())))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y()
                .style(iced::theme::Container::Custom(Box::new(RoundedContainerStyle {
                    radius: RADIUS,
                    background: theme.card_background(),
                })))
                .into();
        }

        container(
            scrollable(column(rows).spacing(2).padding(6)).style(iced::theme::Scrollable::Custom(Box::new(
                ListScrollableStyle {
                    accent: theme.accent(),
                    radius: RADIUS,
                },
            ))),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(RoundedContainerStyle {
            radius: RADIUS,
            background: theme.card_background(),
        })))
        .into()
    }

    fn view_actions(&self) -> Element<'_, Message> {
        let enabled = self.state.controls_enabled();
        let action = |label: &'static str, message: Message| {
            let b = self.styled_button(label, false);
            if enabled {
                b.on_press(message)
            } else {
                b
            }
        };

        row![
            action("Install Selected", Message::Install),
            action("Uninstall Selected", Message::Uninstall),
            action("Upgrade All", Message::Upgrade),
            Space::with_width(Length::Fill),
        ]
        .spacing(8)
        .into()
    }

    fn view_status(&self) -> Element<'_, Message> {
        let theme = self.theme;
        if let TaskState::Running(operation) = self.state.task_state() {
            return text(format!("Running brew {}...", operation))
                .size(12)
                .style(iced::theme::Text::Color(theme.secondary_text()))
                .into();
        }
        match self.state.status() {
            Some(status) => {
                let color = if status.is_error {
                    theme.danger()
                } else {
                    theme.secondary_text()
                };
                text(&status.message).size(12).style(iced::theme::Text::Color(color)).into()
            }
            None => Space::with_height(Length::Fixed(0.0)).into(),
        }
    }
}
