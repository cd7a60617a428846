use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use taskboard::core::display::TaskRow;

use crate::components::task_row::task_row;
use crate::fl;
use crate::message::Message;

pub fn board_view<'a>(rows: &[TaskRow], input_value: &str, full_limit: Option<usize>) -> Element<'a, Message> {
    let input = text_input::text_input(fl!("task-placeholder"), input_value.to_string())
        .on_input(Message::InputChanged)
        .on_submit(|_| Message::AddTask)
        .width(Length::Fill);

    let mut content = column().spacing(12).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(input)
            .push(button::suggested(fl!("add-task")).on_press(Message::AddTask)),
    );

    if let Some(limit) = full_limit {
        content = content.push(text::caption(fl!("board-full", limit = limit.to_string())));
    }

    if rows.is_empty() {
        content = content.push(
            container(text::body(fl!("board-empty")))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else {
        let list = rows
            .iter()
            .fold(column().spacing(4), |list, r| list.push(task_row(r)));
        content = content.push(list);
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
