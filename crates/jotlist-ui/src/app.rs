mod storage;

use chrono::Utc;
use gloo::console::log;
use jotlist_core::{
  AppConfig,
  AppState
};
use yew::{
  Callback,
  Html,
  classes,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use self::storage::{
  BrowserStore,
  apply_theme_to_document
};
use crate::components::{
  TaskForm,
  TaskList,
  ThemeSwitch
};

const APP_CONFIG_TOML: &str =
  include_str!("../assets/app.toml");

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    AppConfig::load_or_default(
      APP_CONFIG_TOML
    )
  });
  let state = {
    let config = config.clone();
    use_state(move || {
      AppState::load(
        &BrowserStore,
        &config
      )
    })
  };

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and state \
         restored"
      );
      || ()
    });
  }

  {
    use_effect_with(
      state.theme,
      move |theme| {
        apply_theme_to_document(*theme);
        tracing::debug!(
          theme = theme.storage_value(),
          "applied theme to document"
        );
        || ()
      }
    );
  }

  let on_title_input = {
    let state = state.clone();
    Callback::from(
      move |value: String| {
        state.set(
          state.with_draft_title(value)
        );
      }
    )
  };

  let on_note_input = {
    let state = state.clone();
    Callback::from(
      move |value: String| {
        state.set(
          state.with_draft_note(value)
        );
      }
    )
  };

  let on_toggle_form = {
    let state = state.clone();
    Callback::from(move |_: ()| {
      state.set(state.toggle_form());
    })
  };

  let on_submit = {
    let state = state.clone();
    let config = config.clone();
    Callback::from(move |_: ()| {
      let next =
        state.submit_draft(Utc::now());
      if next.tasks == state.tasks {
        ui_debug(
          "action.add.ignored",
          "title or note is blank"
        );
        return;
      }
      next.persist_tasks(
        &mut BrowserStore,
        &config
      );
      ui_debug(
        "action.add",
        "task added"
      );
      state.set(next);
    })
  };

  let on_toggle_task = {
    let state = state.clone();
    let config = config.clone();
    Callback::from(move |id: i64| {
      let next = state.toggle(id);
      next.persist_tasks(
        &mut BrowserStore,
        &config
      );
      state.set(next);
    })
  };

  let on_delete_task = {
    let state = state.clone();
    let config = config.clone();
    Callback::from(move |id: i64| {
      let next = state.delete(id);
      next.persist_tasks(
        &mut BrowserStore,
        &config
      );
      state.set(next);
    })
  };

  let on_toggle_theme = {
    let state = state.clone();
    let config = config.clone();
    Callback::from(move |_: ()| {
      let next = state.toggle_theme();
      next.persist_theme(
        &mut BrowserStore,
        &config
      );
      state.set(next);
    })
  };

  let summary = state.summary();
  let ordered: Vec<_> = state
    .ordered_for_display()
    .into_iter()
    .cloned()
    .collect();

  html! {
      <div class={classes!("app", state.theme.as_class())}>
          <header class="topbar">
              <div class="brand">
                  <h1>{ &config.ui.title }</h1>
                  <span class="summary">
                      { format!("{} open · {} done", summary.pending, summary.completed) }
                  </span>
              </div>
              <ThemeSwitch theme={state.theme} on_toggle={on_toggle_theme} />
          </header>

          <main class="content">
              <TaskForm
                  draft={state.draft.clone()}
                  open={state.form_open}
                  on_title={on_title_input}
                  on_note={on_note_input}
                  on_submit={on_submit}
                  on_toggle_open={on_toggle_form}
              />
              <TaskList
                  tasks={ordered}
                  on_toggle={on_toggle_task}
                  on_delete={on_delete_task}
              />
          </main>
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
