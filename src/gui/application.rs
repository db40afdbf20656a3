use std::path::PathBuf;
use iced::{Alignment, Application, Color, Command, Element, Length, Settings, Size, Subscription, window};
use iced::alignment::Horizontal;
use iced::event::{self, Event};
use iced::theme::{self, Theme};
use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use log::info;
use tokio_util::sync::{CancellationToken};

use crate::config::io::{ConfigIO};
use crate::config::types::Config;
use crate::device::constants::{PRODUCT_NAME, PRODUCT_SERIAL};
use crate::device::types::{BatteryIndicator, Device, binding_failed_sample, seed_devices};
use crate::error::AppRunError;
use crate::gui::style::{
    ACCENT, AddDeviceButtonStyleSheet, CardStyleSheet, DANGER, MUTED, PillButtonStyleSheet,
    SUCCESS, ScreenStyleSheet, TextButtonStyleSheet, ThumbnailStyleSheet,
};
use crate::gui::timer::{CommandScheduler, wait_for_timer};
use crate::gui::types::Message;
use crate::pairing::controller::PairingController;
use crate::pairing::random::EntropyRandom;
use crate::pairing::state::{Intent, ViewState};

pub struct ApplicationFlags {
    config_io: ConfigIO,
}

pub struct PairingApplication {
    // this token is cancelled upon exit, which also cancels every pending timer
    app_cancel: CancellationToken,

    // messages that the user must click away
    notices: Vec<String>,

    config_io: ConfigIO,
    controller: PairingController<CommandScheduler, EntropyRandom>,

    // rendered below the known devices, not part of the collection
    binding_failed_sample: Device,
}

impl PairingApplication {
    fn before_close(&mut self) {
        self.controller.shutdown();
        self.app_cancel.cancel();
    }

    fn load_config(&self) -> Command<Message> {
        let config_io = self.config_io.clone();

        let fut = async move {
            config_io.read_or_default().await
        };

        Command::perform(fut, Message::ConfigLoadComplete)
    }

    // Turns the timers armed by the last transition into commands.
    fn arm_timers(&mut self) -> Command<Message> {
        let commands: Vec<Command<Message>> = self.controller
            .scheduler_mut()
            .take_armed()
            .into_iter()
            .map(|timer| Command::perform(wait_for_timer(timer), Message::TimerSettled))
            .collect();

        Command::batch(commands)
    }

    fn list_view(&self) -> Element<Message> {
        let mut cards = Column::new().spacing(16).padding([8, 20]);

        for device in self.controller.devices() {
            cards = cards.push(device_card(device));
        }
        cards = cards.push(device_card(&self.binding_failed_sample));

        cards = cards.push(
            button(
                column![
                    text("+").size(40),
                    text("Add device"),
                ].align_items(Alignment::Center).spacing(8)
            )
                .width(Length::Fill)
                .padding(32)
                .style(theme::Button::Custom(Box::new(AddDeviceButtonStyleSheet)))
                .on_press(Message::Intent(Intent::BeginSearch))
        );

        column![
            header("My equipment", None),
            scrollable(cards).height(Length::Fill),
        ].into()
    }

    fn found_view(&self) -> Element<Message> {
        let card = container(
            column![
                thumbnail(),
                text(PRODUCT_NAME).size(22),
                text(format!("S/N: {}", PRODUCT_SERIAL)).size(13).style(MUTED),
                Space::with_height(16),
                pill_button("Connect", true, Intent::ConfirmConnect),
            ].align_items(Alignment::Center).spacing(8)
        )
            .padding(24)
            .width(Length::Fill)
            .style(theme::Container::Custom(Box::new(CardStyleSheet)));

        column![
            header("Device Found", Some(Intent::Back)),
            column![
                card,
                row![
                    text("Is this not your device?").size(12).style(MUTED),
                    button(text("Scan again").size(12))
                        .padding(0)
                        .style(theme::Button::Custom(Box::new(TextButtonStyleSheet { color: ACCENT })))
                        .on_press(Message::Intent(Intent::RejectAndRescan)),
                ].spacing(4).align_items(Alignment::Center),
            ].spacing(24).padding([40, 20]).align_items(Alignment::Center),
        ].into()
    }
}

impl Application for PairingApplication {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ApplicationFlags;

    fn new(flags: ApplicationFlags) -> (PairingApplication, Command<Self::Message>) {
        let app_cancel = CancellationToken::new();

        let controller = PairingController::new(
            seed_devices(),
            Config::default(),
            CommandScheduler::new(app_cancel.clone()),
            EntropyRandom::new(),
        );

        let app = PairingApplication {
            app_cancel,
            notices: Vec::new(),
            config_io: flags.config_io,
            controller,
            binding_failed_sample: binding_failed_sample(),
        };

        let command = app.load_config();
        (app, command)
    }

    fn title(&self) -> String {
        String::from(concat!("NotePins Pairing ", env!("CARGO_PKG_VERSION")))
    }

    fn update(&mut self, message: Message) -> Command<Self::Message> {
        match message {
            Message::ConfigLoadComplete((config, error_message)) => {
                info!("Config load complete");
                self.controller.set_config(config);
                if let Some(error_message) = error_message {
                    self.notices.push(error_message);
                }
            },
            Message::NoticeConfirmed => {
                if !self.notices.is_empty() {
                    self.notices.remove(0);
                }
            },
            Message::EventOccurred(Event::Window(id, window::Event::CloseRequested)) => {
                info!("Close requested");
                self.before_close();
                return window::close(id);
            },
            Message::Intent(intent) => {
                if self.controller.dispatch(intent).is_some() {
                    return self.arm_timers();
                }
            },
            Message::TimerSettled(Some(ticket)) => {
                if self.controller.timer_elapsed(ticket).is_some() {
                    return self.arm_timers();
                }
            },

            _ => {}
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen().map(Message::EventOccurred)
    }

    fn view(&self) -> Element<Message> {
        if let Some(notice) = self.notices.first() {
            return container(
                column![
                    text(notice),

                    button(text("Okay"))
                        .on_press(Message::NoticeConfirmed),

                ].align_items(Alignment::Center).spacing(20),
            )
            .width(Length::Fill)
            .padding(20)
            .into()
        }

        let screen: Element<Message> = match self.controller.state() {
            ViewState::List => self.list_view(),
            ViewState::Searching => column![
                header("Add Device", Some(Intent::Back)),
                status_body(
                    "◎",
                    ACCENT,
                    "Searching...",
                    "Place your phone close to the device.\nEnsure Bluetooth is turned on.",
                    None,
                ),
            ].into(),
            ViewState::SearchFailed => column![
                header("Add Device", Some(Intent::Back)),
                status_body(
                    "✕",
                    DANGER,
                    "No devices found",
                    "Make sure your device is powered on, in pairing mode, and near your phone.",
                    Some(pill_button("Try Again", false, Intent::RetrySearch)),
                ),
            ].into(),
            ViewState::Found => self.found_view(),
            ViewState::Connecting => column![
                header("Connecting", None),
                status_body("ᛒ", ACCENT, "Connecting...", "Do not turn off Bluetooth", None),
            ].into(),
            ViewState::ConnectionFailed => column![
                header("Connection Failed", Some(Intent::BackToFound)),
                status_body(
                    "✕",
                    DANGER,
                    "Connection Failed",
                    "Something went wrong during the pairing process. Please try again.",
                    Some(pill_button("Retry Connection", true, Intent::RetryConnect)),
                ),
            ].into(),
            ViewState::Success => status_body(
                "✓",
                SUCCESS,
                "Connected!",
                "Your device is ready to use.",
                None,
            ),
        };

        container(screen)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(ScreenStyleSheet)))
            .into()
    }
}

// The back button is only enabled when `back` is given.
fn header<'a>(title: &'a str, back: Option<Intent>) -> Element<'a, Message> {
    let mut back_button = button(text("‹").size(28))
        .style(theme::Button::Custom(Box::new(TextButtonStyleSheet { color: Color::BLACK })));

    if let Some(intent) = back {
        back_button = back_button.on_press(Message::Intent(intent));
    }

    row![
        container(back_button).width(48),
        text(title).size(18).width(Length::Fill).horizontal_alignment(Horizontal::Center),
        Space::with_width(48),
    ]
        .align_items(Alignment::Center)
        .padding(16)
        .into()
}

fn status_body<'a>(
    symbol: &'a str,
    symbol_color: Color,
    title: &'a str,
    hint: &'a str,
    action: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut body = column![
        text(symbol).size(64).style(symbol_color),
        text(title).size(22),
        text(hint).size(14).style(MUTED).horizontal_alignment(Horizontal::Center),
    ]
        .align_items(Alignment::Center)
        .spacing(12)
        .max_width(320);

    if let Some(action) = action {
        body = body.push(Space::with_height(24)).push(action);
    }

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .center_x()
        .center_y()
        .into()
}

fn pill_button<'a>(label: &'a str, primary: bool, intent: Intent) -> Element<'a, Message> {
    button(text(label).width(Length::Fill).horizontal_alignment(Horizontal::Center))
        .width(Length::Fill)
        .padding([14, 24])
        .style(theme::Button::Custom(Box::new(PillButtonStyleSheet { primary })))
        .on_press(Message::Intent(intent))
        .into()
}

fn thumbnail<'a>() -> Element<'a, Message> {
    container(Space::new(48, 80))
        .style(theme::Container::Custom(Box::new(ThumbnailStyleSheet)))
        .into()
}

fn device_card(device: &Device) -> Element<Message> {
    let mut status = row![
        if device.connected {
            text("Bluetooth on").size(12).style(ACCENT)
        } else {
            text("Bluetooth off").size(12).style(MUTED)
        },
    ].spacing(12);

    match device.battery_indicator() {
        Some(BatteryIndicator::Normal) => {
            status = status.push(text(format!("Battery {}%", device.battery_level)).size(12));
        },
        Some(BatteryIndicator::Low) => {
            status = status.push(text(format!("Low battery {}%", device.battery_level)).size(12).style(DANGER));
        },
        None => {},
    }

    let mut details = column![
        text(&device.name).size(18),
        text(format!("Serial number: {}", device.serial)).size(11).style(MUTED),
        text(format!("Firmware version: {}", device.firmware)).size(11).style(MUTED),
        status,
    ]
        .spacing(6)
        .width(Length::Fill);

    let mut side = column![thumbnail()]
        .spacing(16)
        .align_items(Alignment::Center);

    if device.is_binding_failed() {
        details = details.push(text("(!) Binding failed").size(12).style(DANGER));
        // relinking re-runs the pairing flow
        side = side.push(
            button(text("Link").size(14))
                .padding([8, 24])
                .style(theme::Button::Custom(Box::new(PillButtonStyleSheet { primary: true })))
                .on_press(Message::Intent(Intent::BeginSearch))
        );
    }

    container(row![details, side].spacing(16))
        .padding(20)
        .width(Length::Fill)
        .style(theme::Container::Custom(Box::new(CardStyleSheet)))
        .into()
}

pub fn run_application(config_path: Option<PathBuf>) -> Result<(), AppRunError> {
    let mut config_io = ConfigIO::new_sync(config_path)?;
    let mut config_locker = config_io.locker()?;
    let _lock_guard = config_locker.lock()?;

    let flags = ApplicationFlags { config_io };
    let mut settings = Settings::with_flags(flags);

    // handle exits ourselves (Event::CloseRequested)
    settings.id = Some("notepins-pairing".to_string());
    settings.window.exit_on_close_request = false;
    settings.window.size = Size::new(420.0, 780.0);
    settings.window.resizable = false;

    // this function will call process::exit() unless there was a startup error
    PairingApplication::run(settings)?;
    Ok(())
}
