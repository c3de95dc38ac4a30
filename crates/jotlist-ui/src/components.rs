use chrono::Local;
use jotlist_core::{
  Draft,
  TaskRecord,
  ThemeMode
};
use web_sys::{
  HtmlInputElement,
  HtmlTextAreaElement,
  InputEvent,
  KeyboardEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub draft:          Draft,
  pub open:           bool,
  pub on_title:       Callback<String>,
  pub on_note:        Callback<String>,
  pub on_submit:      Callback<()>,
  pub on_toggle_open: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let on_toggle_open =
    props.on_toggle_open.clone();
  let toggle_label = if props.open {
    "Cancel"
  } else {
    "New task"
  };
  let toggle = html! {
      <button
          class="btn"
          type="button"
          onclick={move |_| on_toggle_open.emit(())}
      >
          { toggle_label }
      </button>
  };

  if !props.open {
    return html! {
        <section class="panel form collapsed">{ toggle }</section>
    };
  }

  let on_submit = props.on_submit.clone();
  let onsubmit =
    move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    };

  let on_title = props.on_title.clone();
  let on_note = props.on_note.clone();
  let on_submit_shortcut =
    props.on_submit.clone();
  let submittable =
    props.draft.is_submittable();

  html! {
      <section class="panel form">
          <form {onsubmit}>
              <input
                  class="title-input"
                  type="text"
                  placeholder="Title"
                  value={props.draft.title.clone()}
                  oninput={move |e: InputEvent| {
                      let input: HtmlInputElement = e.target_unchecked_into();
                      on_title.emit(input.value());
                  }}
              />
              <textarea
                  class="note-input"
                  rows="4"
                  placeholder="Note"
                  value={props.draft.note.clone()}
                  oninput={move |e: InputEvent| {
                      let input: HtmlTextAreaElement = e.target_unchecked_into();
                      on_note.emit(input.value());
                  }}
                  onkeydown={move |e: KeyboardEvent| {
                      if e.key() == "Enter" && (e.ctrl_key() || e.meta_key()) {
                          e.prevent_default();
                          on_submit_shortcut.emit(());
                      }
                  }}
              />
              <div class="form-actions">
                  { toggle }
                  <button class="btn ok" type="submit" disabled={!submittable}>
                      { "Add" }
                  </button>
              </div>
          </form>
      </section>
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  /// Already in display order.
  pub tasks:     Vec<TaskRecord>,
  pub on_toggle: Callback<i64>,
  pub on_delete: Callback<i64>
}

/// Ids can repeat, so the row key
/// pairs the id with its position.
fn row_key(
  position: usize,
  task: &TaskRecord
) -> String {
  format!("{}-{position}", task.id)
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.tasks.is_empty() {
    return html! {
        <section class="panel list empty">{ "Nothing to do yet." }</section>
    };
  }

  html! {
      <section class="panel list">
          {
              for props.tasks.iter().enumerate().map(|(position, task)| html! {
                  <TaskRow
                      key={row_key(position, task)}
                      task={task.clone()}
                      on_toggle={props.on_toggle.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              })
          }
      </section>
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:      TaskRecord,
  pub on_toggle: Callback<i64>,
  pub on_delete: Callback<i64>
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let id = props.task.id;
  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();

  let created = props
    .task
    .created_at
    .map(|at| {
      at.with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
    });

  html! {
      <div class={classes!("row", props.task.completed.then_some("done"))}>
          <input
              type="checkbox"
              class="toggle"
              checked={props.task.completed}
              onclick={move |_| on_toggle.emit(id)}
          />
          <div class="body">
              <div class="title">{ &props.task.title }</div>
              <div class="note">{ &props.task.note }</div>
              {
                  match created {
                      Some(created) => html! { <div class="meta">{ created }</div> },
                      None => html! {},
                  }
              }
          </div>
          <button
              class="btn danger"
              type="button"
              title="Delete"
              onclick={move |_| on_delete.emit(id)}
          >
              { "Delete" }
          </button>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct ThemeSwitchProps {
  pub theme:     ThemeMode,
  pub on_toggle: Callback<()>
}

#[function_component(ThemeSwitch)]
pub fn theme_switch(
  props: &ThemeSwitchProps
) -> Html {
  let on_toggle =
    props.on_toggle.clone();

  html! {
      <label class="theme-switch">
          <input
              type="checkbox"
              role="switch"
              checked={props.theme.is_dark()}
              onchange={move |_| on_toggle.emit(())}
          />
          <span>{ props.theme.toggle_label() }</span>
      </label>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: i64) -> TaskRecord {
    TaskRecord {
      id,
      title: "t".to_string(),
      note: "n".to_string(),
      completed: false,
      created_at: None
    }
  }

  #[test]
  fn row_keys_stay_unique_for_repeated_ids()
  {
    let tasks =
      vec![record(5), record(5), record(6)];
    let keys: Vec<String> = tasks
      .iter()
      .enumerate()
      .map(|(position, task)| {
        row_key(position, task)
      })
      .collect();

    assert_eq!(
      keys,
      vec!["5-0", "5-1", "6-2"]
    );
  }
}
