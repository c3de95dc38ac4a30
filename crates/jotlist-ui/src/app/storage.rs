use anyhow::{
  Context,
  anyhow
};
use jotlist_core::{
  KeyValueStore,
  ThemeMode
};

/// `window.localStorage`, looked up on
/// every access so a storage that
/// becomes unavailable mid-session only
/// fails the call that hit it.
pub struct BrowserStore;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .context("no global window")?
    .local_storage()
    .map_err(|err| {
      anyhow!(
        "localStorage access denied: \
         {err:?}"
      )
    })?
    .context("localStorage unavailable")
}

impl KeyValueStore for BrowserStore {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        anyhow!(
          "failed reading {key}: {err:?}"
        )
      })
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "failed writing {key}: {err:?}"
        )
      })
  }
}

/// Puts the theme class on `<html>` so
/// the whole document, not just the app
/// root, picks up the palette.
pub fn apply_theme_to_document(
  theme: ThemeMode
) {
  let Some(root) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.document_element()
    })
  else {
    tracing::warn!(
      "no document element; theme not \
       applied"
    );
    return;
  };

  let classes = root.class_list();
  for mode in
    [ThemeMode::Light, ThemeMode::Dark]
  {
    if let Err(err) =
      classes.remove_1(mode.as_class())
    {
      tracing::warn!(
        class = mode.as_class(),
        error = ?err,
        "failed clearing theme class"
      );
    }
  }

  if let Err(err) =
    classes.add_1(theme.as_class())
  {
    tracing::error!(
      error = ?err,
      "failed applying theme class"
    );
  }
  if let Err(err) = root.set_attribute(
    "data-theme",
    theme.storage_value()
  ) {
    tracing::warn!(
      error = ?err,
      "failed setting data-theme \
       attribute"
    );
  }
}
