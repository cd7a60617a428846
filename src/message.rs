use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum Message {
    // Input
    InputChanged(String),
    AddTask,

    // Task actions
    ToggleTask(Uuid),
    DeleteTask(Uuid),

    // Periodic recomputation
    Tick,
}
