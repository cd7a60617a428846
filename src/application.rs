use chrono::Utc;

use cosmic::app::{Core, Task as CosmicTask};
use cosmic::widget::text;
use cosmic::{Application, Element, executor};

use taskboard::config::{self, TaskBoardConfig};
use taskboard::core::board::{BoardError, TaskBoard};
use taskboard::core::display::{self, TaskRow};
use taskboard::storage::{self, KeyValueStore, StorageError};

use crate::fl;
use crate::message::Message;
use crate::pages;

pub struct TaskBoardApp {
    core: Core,
    config: TaskBoardConfig,
    board: TaskBoard,
    store: Option<KeyValueStore>,

    // Rebuilt on every store change, never on redraw
    rows: Vec<TaskRow>,

    // UI state
    input: String,
    full_notice: Option<usize>,
}

pub struct Flags {
    pub config: TaskBoardConfig,
}

impl Application for TaskBoardApp {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = config::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;
        let mut board = TaskBoard::new(config.tie_precedence, config.max_tasks);

        let mut store = match KeyValueStore::open(&config.data_directory) {
            Ok(store) => Some(store),
            Err(e) => {
                log::error!("Failed to open task storage, changes will not be saved: {}", e);
                None
            }
        };

        let mut unreadable = false;
        if let Some(ref store) = store {
            match storage::load_tasks(store, config.storage_key()) {
                Ok(Some(tasks)) => {
                    log::info!("Loaded {} tasks from {}", tasks.len(), store.slot_path(config.storage_key()).display());
                    board.replace_all(tasks);
                }
                Ok(None) => log::debug!("No saved tasks, starting empty"),
                Err(e @ StorageError::Malformed { .. }) => {
                    log::error!("Failed to load tasks: {}", e);
                    match store.quarantine(config.storage_key()) {
                        Ok(path) => log::warn!("Moved unreadable tasks to {}", path.display()),
                        Err(e) => {
                            log::error!("Failed to move unreadable tasks aside, changes will not be saved: {}", e);
                            unreadable = true;
                        }
                    }
                }
                Err(e) => {
                    log::error!("Failed to load tasks, changes will not be saved: {}", e);
                    unreadable = true;
                }
            }
        }
        if unreadable {
            store = None;
        }

        let mut app = Self {
            core,
            config,
            board,
            store,
            rows: Vec::new(),
            input: String::new(),
            full_notice: None,
        };
        app.rebuild_rows();

        (app, CosmicTask::none())
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(fl!("app-title")).into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
            }

            Message::AddTask => {
                match self.board.add_from_input(&mut self.input, Utc::now()) {
                    Ok(id) => {
                        log::debug!("Added task {}", id);
                        self.full_notice = None;
                        self.on_board_changed();
                    }
                    Err(BoardError::Full { limit }) => {
                        log::warn!("Board is full ({} tasks), not adding", limit);
                        self.full_notice = Some(limit);
                    }
                }
            }

            Message::ToggleTask(id) => {
                if self.board.toggle(id, Utc::now()) {
                    self.on_board_changed();
                } else {
                    log::debug!("Toggle for unknown task {}", id);
                }
            }

            Message::DeleteTask(id) => {
                if let Some(task) = self.board.delete(id) {
                    log::debug!("Deleted task {}", task.id);
                    self.full_notice = None;
                    self.on_board_changed();
                }
            }

            Message::Tick => {
                self.board.tick(Utc::now());
                self.on_board_changed();
            }
        }

        CosmicTask::none()
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        self.input.clear();
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::time::every(self.config.tick_interval()).map(|_| Message::Tick)
    }

    fn view(&self) -> Element<'_, Message> {
        pages::board::board_view(&self.rows, &self.input, self.full_notice)
    }
}

impl TaskBoardApp {
    /// Write-through plus row rebuild, run after every store mutation.
    fn on_board_changed(&mut self) {
        self.save_tasks();
        self.rebuild_rows();
    }

    fn rebuild_rows(&mut self) {
        self.rows = display::build_rows(self.board.tasks());
    }

    fn save_tasks(&self) {
        let Some(ref store) = self.store else {
            return;
        };
        if let Err(e) = storage::save_tasks(store, self.config.storage_key(), self.board.tasks()) {
            log::error!("Failed to save tasks: {}", e);
        }
    }
}
