//! The busy-times page as a Handlebars template. Strict mode is on so
//! a field missing from the page model fails the render instead of
//! producing half-filled markup.

use chrono::DateTime;
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};

use super::ViewError;

pub const BUSY_TIMES_PAGE: &str = "busy_times";

const BUSY_TIMES_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Busy Times</title>
  <style>
    body { font-family: sans-serif; margin: 2em; }
    .row { display: flex; flex-wrap: wrap; gap: 1em; margin-bottom: 1em; align-items: center; }
    .row.calendars .col { flex: 1 1 30%; min-width: 12em; }
    table.busy-times { border-collapse: collapse; margin-top: 2em; }
    table.busy-times th, table.busy-times td { border: 1px solid #ccc; padding: 0.3em 0.8em; }
  </style>
</head>
<body>
<div class="container">
  <h1>Busy Times</h1>
  <form id="busy-times" action="/setdata" method="POST">
    <div class="row">
      <label for="begin_time">From</label>
      <input type="time" id="begin_time" name="begin_time" value="{{begin_time}}">
      <label for="end_time">To</label>
      <input type="time" id="end_time" name="end_time" value="{{end_time}}">
    </div>
    <div class="row">
      <label for="daterange">Dates</label>
      <input type="text" id="daterange" name="daterange" size="25" value="{{daterange}}">
      <div class="ranges">
      {{#each ranges}}
        <button type="button" class="range" data-range="{{label}}">{{name}}</button>
      {{/each}}
      </div>
    </div>
    {{#if authorized}}
    <h2>Calendars</h2>
    {{#each calendar_rows}}
    <div class="row calendars">
      {{#each this}}
      <div class="col">
        <label><input type="checkbox" name="checkbox" value="{{id}}"> {{summary}}</label>
      </div>
      {{/each}}
    </div>
    {{/each}}
    {{else}}
    <p class="authorize">Submitting will ask you to authorize access to your Google Calendar account so your calendars can be listed here.</p>
    {{/if}}
    <input type="submit" id="submit" value="Submit"{{#if submit_disabled}} disabled{{/if}}>
  </form>
  {{#if busy_times}}
  <table class="busy-times">
    <thead>
      <tr><th>Event Title</th><th>Start Date-time</th><th>End Date-time</th></tr>
    </thead>
    <tbody>
    {{#each busy_times}}
      <tr><td>{{summary}}</td><td>{{fmtdate begin_datetime}} {{fmttime begin_datetime}}</td><td>{{fmtdate end_datetime}} {{fmttime end_datetime}}</td></tr>
    {{/each}}
    </tbody>
  </table>
  {{/if}}
</div>
<script>
(function () {
  var begin = document.getElementById("begin_time");
  var end = document.getElementById("end_time");
  var submit = document.getElementById("submit");

  // Minutes since midnight, or null when the field is empty
  function minutes(value) {
    var parts = value.split(":");
    if (parts.length < 2 || parts[0] === "") {
      return null;
    }
    return parseInt(parts[0], 10) * 60 + parseInt(parts[1], 10);
  }

  function validate() {
    var b = minutes(begin.value);
    var e = minutes(end.value);
    submit.disabled = b === null || e === null || b >= e;
  }

  begin.addEventListener("change", validate);
  end.addEventListener("change", validate);

  document.querySelectorAll("button.range").forEach(function (button) {
    button.addEventListener("click", function () {
      document.getElementById("daterange").value = button.dataset.range;
    });
  });

  validate();
})();
</script>
</body>
</html>
"#;

fn datetime_param<'a>(h: &'a Helper, name: &'static str) -> Result<&'a str, RenderErrorReason> {
    h.param(0)
        .and_then(|v| v.value().as_str())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(name, 0))
}

fn format_param(h: &Helper, name: &'static str, fmt: &str) -> Result<String, RenderErrorReason> {
    let raw = datetime_param(h, name)?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| RenderErrorReason::Other(format!("{}: bad datetime '{}': {}", name, raw, e)))?;
    Ok(parsed.format(fmt).to_string())
}

/// `{{fmtdate value}}` renders an RFC 3339 datetime as `Mon 01/01/2024`
fn fmtdate(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&format_param(h, "fmtdate", "%a %m/%d/%Y")?)?;
    Ok(())
}

/// `{{fmttime value}}` renders an RFC 3339 datetime as `09:00`
fn fmttime(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&format_param(h, "fmttime", "%H:%M")?)?;
    Ok(())
}

pub fn templates<'a>() -> Result<Handlebars<'a>, ViewError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_helper("fmtdate", Box::new(fmtdate));
    registry.register_helper("fmttime", Box::new(fmttime));
    registry.register_template_string(BUSY_TIMES_PAGE, BUSY_TIMES_TEMPLATE)?;
    Ok(registry)
}
