use cosmic::iced::{Alignment, Color, Length};
use cosmic::widget::{button, container, row, text};
use cosmic::{Element, theme};

use taskboard::core::display::TaskRow;

use crate::fl;
use crate::message::Message;

// Column widths for consistent alignment
const COL_TOGGLE: f32 = 104.0;
const COL_DURATION: f32 = 96.0;
const COL_NOTATION: f32 = 80.0;
const COL_DELETE: f32 = 88.0;

fn col(width: f32, content: impl Into<Element<'static, Message>>) -> Element<'static, Message> {
    container(content).width(Length::Fixed(width)).into()
}

fn col_fill(content: impl Into<Element<'static, Message>>) -> Element<'static, Message> {
    container(content).width(Length::Fill).into()
}

fn text_class(color: Option<(u8, u8, u8)>) -> theme::Text {
    match color {
        Some((r, g, b)) => theme::Text::Color(Color::from_rgb8(r, g, b)),
        None => theme::Text::Default,
    }
}

/// One task: label, completion toggle, elapsed time, notation, delete.
pub fn task_row(task: &TaskRow) -> Element<'static, Message> {
    let id = task.id;

    let label = col_fill(text::body(task.label.clone()).class(text_class(task.color)));

    let toggle = if task.completed {
        button::suggested(fl!("task-completed"))
    } else {
        button::standard(fl!("task-pending"))
    }
    .on_press(Message::ToggleTask(id));

    let duration = col(COL_DURATION, text::caption(task.duration.clone()));

    let notation: Element<'static, Message> = match task.notation {
        Some(label) => col(
            COL_NOTATION,
            text::caption(label.to_string()).class(text_class(task.color)),
        ),
        None => col(COL_NOTATION, text::caption("")),
    };

    let delete = button::destructive(fl!("task-delete")).on_press(Message::DeleteTask(id));

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(label)
        .push(col(COL_TOGGLE, toggle))
        .push(duration)
        .push(notation)
        .push(col(COL_DELETE, delete))
        .into()
}
