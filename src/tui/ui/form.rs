//! Assessment input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    AssessmentRequest, Comorbidity, MeasurementInput, MedicalHistory, Medication,
    PopulationGroup, Sex,
};
use crate::tui::styles::{MedicalTheme, LOGO_SMALL};

/// One row of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Name,
    Age,
    Sex,
    Weight,
    Height,
    Waist,
    Hip,
    Population,
    Comorbidity(Comorbidity),
    OtherComorbidities,
    Medication(Medication),
}

impl FormRow {
    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name (optional)",
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::Weight => "Weight",
            Self::Height => "Height",
            Self::Waist => "Waist circumference",
            Self::Hip => "Hip circumference",
            Self::Population => "Population group",
            Self::Comorbidity(c) => c.form_label(),
            Self::OtherComorbidities => "Other comorbidities",
            Self::Medication(m) => m.label(),
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Name => "shown only in the report",
            Self::Age => "years (0-120)",
            Self::Weight => "kg (1-500)",
            Self::Height => "cm (30-300)",
            Self::Waist => "cm, at the navel (optional)",
            Self::Hip => "cm (optional)",
            Self::OtherComorbidities => "comma separated",
            Self::Sex | Self::Population | Self::Comorbidity(_) | Self::Medication(_) => "",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Age | Self::Weight | Self::Height | Self::Waist | Self::Hip
        )
    }

    fn is_text(self) -> bool {
        self.is_numeric() || matches!(self, Self::Name | Self::OtherComorbidities)
    }
}

const COMORBIDITY_COUNT: usize = Comorbidity::ALL.len();

/// Form state: raw text buffers plus typed selections.
pub struct AssessmentFormState {
    rows: Vec<FormRow>,
    pub selected_row: usize,
    name: String,
    age: String,
    weight: String,
    height: String,
    waist: String,
    hip: String,
    other_comorbidities: String,
    sex: Sex,
    population: PopulationGroup,
    comorbidities: [bool; COMORBIDITY_COUNT],
    /// Selected medications, in selection order
    medications: Vec<Medication>,
    pub error_message: Option<String>,
}

impl Default for AssessmentFormState {
    fn default() -> Self {
        let rows = [
            FormRow::Name,
            FormRow::Age,
            FormRow::Sex,
            FormRow::Weight,
            FormRow::Height,
            FormRow::Waist,
            FormRow::Hip,
            FormRow::Population,
        ]
        .into_iter()
        .chain(Comorbidity::ALL.into_iter().map(FormRow::Comorbidity))
        .chain(std::iter::once(FormRow::OtherComorbidities))
        .chain(Medication::ALL.into_iter().map(FormRow::Medication))
        .collect();

        Self {
            rows,
            selected_row: 0,
            name: String::new(),
            age: String::new(),
            weight: String::new(),
            height: String::new(),
            waist: String::new(),
            hip: String::new(),
            other_comorbidities: String::new(),
            sex: Sex::default(),
            population: PopulationGroup::default(),
            comorbidities: [false; COMORBIDITY_COUNT],
            medications: Vec::new(),
            error_message: None,
        }
    }
}

impl AssessmentFormState {
    /// The row under the cursor
    #[must_use]
    pub fn current_row(&self) -> FormRow {
        self.rows[self.selected_row]
    }

    /// Move to the next row
    pub fn next_row(&mut self) {
        self.selected_row = (self.selected_row + 1) % self.rows.len();
    }

    /// Move to the previous row
    pub fn prev_row(&mut self) {
        if self.selected_row == 0 {
            self.selected_row = self.rows.len() - 1;
        } else {
            self.selected_row -= 1;
        }
    }

    fn buffer(&self, row: FormRow) -> Option<&String> {
        match row {
            FormRow::Name => Some(&self.name),
            FormRow::Age => Some(&self.age),
            FormRow::Weight => Some(&self.weight),
            FormRow::Height => Some(&self.height),
            FormRow::Waist => Some(&self.waist),
            FormRow::Hip => Some(&self.hip),
            FormRow::OtherComorbidities => Some(&self.other_comorbidities),
            _ => None,
        }
    }

    fn buffer_mut(&mut self, row: FormRow) -> Option<&mut String> {
        match row {
            FormRow::Name => Some(&mut self.name),
            FormRow::Age => Some(&mut self.age),
            FormRow::Weight => Some(&mut self.weight),
            FormRow::Height => Some(&mut self.height),
            FormRow::Waist => Some(&mut self.waist),
            FormRow::Hip => Some(&mut self.hip),
            FormRow::OtherComorbidities => Some(&mut self.other_comorbidities),
            _ => None,
        }
    }

    /// Handle a typed character: text input on text rows, Space toggles elsewhere.
    pub fn input_char(&mut self, c: char) {
        let row = self.current_row();
        if row.is_text() {
            let accepted = if row.is_numeric() {
                c.is_ascii_digit() || c == '.'
            } else {
                !c.is_control()
            };
            if !accepted {
                return;
            }
            if let Some(buffer) = self.buffer_mut(row) {
                buffer.push(c);
            }
            self.error_message = None;
        } else if c == ' ' {
            self.activate();
        }
    }

    /// Cycle a select or flip a checkbox on the current row.
    pub fn activate(&mut self) {
        match self.current_row() {
            FormRow::Sex => {
                let idx = Sex::ALL.iter().position(|s| *s == self.sex).unwrap_or(0);
                self.sex = Sex::ALL[(idx + 1) % Sex::ALL.len()];
            }
            FormRow::Population => {
                let idx = PopulationGroup::ALL
                    .iter()
                    .position(|p| *p == self.population)
                    .unwrap_or(0);
                self.population = PopulationGroup::ALL[(idx + 1) % PopulationGroup::ALL.len()];
            }
            FormRow::Comorbidity(c) => {
                if let Some(idx) = Comorbidity::ALL.iter().position(|x| *x == c) {
                    self.comorbidities[idx] = !self.comorbidities[idx];
                }
            }
            FormRow::Medication(m) => self.toggle_medication(m),
            _ => return,
        }
        self.error_message = None;
    }

    /// "None/don't know" excludes every other medication and vice versa.
    fn toggle_medication(&mut self, medication: Medication) {
        if let Some(pos) = self.medications.iter().position(|m| *m == medication) {
            self.medications.remove(pos);
            return;
        }
        if medication == Medication::NoneOrUnknown {
            self.medications.clear();
        } else {
            self.medications.retain(|m| *m != Medication::NoneOrUnknown);
        }
        self.medications.push(medication);
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let row = self.current_row();
        if let Some(buffer) = self.buffer_mut(row) {
            buffer.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let row = self.current_row();
        if let Some(buffer) = self.buffer_mut(row) {
            buffer.zeroize();
        }
    }

    /// Wipe all text buffers from memory and reset every selection.
    ///
    /// Called when the form is cancelled or a new assessment is started.
    pub fn clear_sensitive(&mut self) {
        for row in self.rows.clone() {
            if let Some(buffer) = self.buffer_mut(row) {
                buffer.zeroize();
            }
        }
        self.sex = Sex::default();
        self.population = PopulationGroup::default();
        self.comorbidities = [false; COMORBIDITY_COUNT];
        self.medications.clear();
        self.error_message = None;
        self.selected_row = 0;
    }

    fn parse_number(row: FormRow, value: &str, required: bool) -> Result<f64, String> {
        let value = value.trim();
        if value.is_empty() {
            return if required {
                Err(format!("{}: Required", row.label()))
            } else {
                Ok(0.0)
            };
        }
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("{}: Invalid number", row.label()))
    }

    /// Convert the buffers into a typed request.
    ///
    /// Range checks are left to `MeasurementInput::validate`; this only parses.
    ///
    /// # Errors
    /// Returns a message naming the first field that cannot be parsed.
    pub fn to_request(&self) -> Result<AssessmentRequest, String> {
        let age_text = self.age.trim();
        if age_text.is_empty() {
            return Err(format!("{}: Required", FormRow::Age.label()));
        }
        let age = age_text
            .parse::<u32>()
            .map_err(|_| format!("{}: Enter whole years", FormRow::Age.label()))?;

        let measurements = MeasurementInput {
            weight_kg: Self::parse_number(FormRow::Weight, &self.weight, true)?,
            height_cm: Self::parse_number(FormRow::Height, &self.height, true)?,
            waist_cm: Self::parse_number(FormRow::Waist, &self.waist, false)?,
            hip_cm: Self::parse_number(FormRow::Hip, &self.hip, false)?,
            age,
            sex: self.sex,
            population: self.population,
        };

        let history = MedicalHistory {
            comorbidities: Comorbidity::ALL
                .iter()
                .zip(self.comorbidities.iter())
                .filter(|(_, checked)| **checked)
                .map(|(c, _)| *c)
                .collect(),
            other_comorbidities: MedicalHistory::parse_other_comorbidities(
                &self.other_comorbidities,
            ),
            medications: self.medications.clone(),
        };

        let name = self.name.trim();
        Ok(AssessmentRequest {
            name: (!name.is_empty()).then(|| name.to_string()),
            measurements,
            history,
        })
    }

    /// Load sample data for a quick demonstration (Asian male, central obesity)
    pub fn load_sample_data(&mut self) {
        self.clear_sensitive();
        self.age = "62".to_string();
        self.weight = "80".to_string();
        self.height = "165".to_string();
        self.waist = "95".to_string();
        self.hip = "98".to_string();
        self.sex = Sex::Male;
        self.population = PopulationGroup::Asian;
        if let Some(idx) = Comorbidity::ALL
            .iter()
            .position(|c| *c == Comorbidity::Hypertension)
        {
            self.comorbidities[idx] = true;
        }
        self.medications.push(Medication::NoneOrUnknown);
    }

    fn row_value(&self, row: FormRow) -> Span<'_> {
        match row {
            FormRow::Sex => Span::styled(self.sex.to_string(), MedicalTheme::text()),
            FormRow::Population => {
                Span::styled(self.population.to_string(), MedicalTheme::text())
            }
            FormRow::Comorbidity(c) => {
                let checked = Comorbidity::ALL
                    .iter()
                    .position(|x| *x == c)
                    .is_some_and(|idx| self.comorbidities[idx]);
                checkbox(checked)
            }
            FormRow::Medication(m) => checkbox(self.medications.contains(&m)),
            _ => match self.buffer(row) {
                Some(value) if !value.is_empty() => {
                    Span::styled(value.as_str(), MedicalTheme::text())
                }
                _ => Span::styled(row.hint(), MedicalTheme::text_muted()),
            },
        }
    }
}

fn checkbox(checked: bool) -> Span<'static> {
    if checked {
        Span::styled("[x]", MedicalTheme::checked())
    } else {
        Span::styled("[ ]", MedicalTheme::text_muted())
    }
}

/// Render the assessment form
pub fn render_assessment_form(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_rows(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {LOGO_SMALL} "), MedicalTheme::header()),
        Span::styled(" Overweight and Obesity Assessment", MedicalTheme::title()),
        Span::styled(" │ Adults", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn section_title(row: FormRow) -> Option<&'static str> {
    match row {
        FormRow::Name => Some("Personal details"),
        FormRow::Comorbidity(Comorbidity::Diabetes) => Some("Comorbidities"),
        FormRow::Medication(Medication::Insulin) => {
            Some("Weight-promoting medications (may cause weight gain)")
        }
        _ => None,
    }
}

fn render_form_rows(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let mut lines = Vec::with_capacity(state.rows.len() + 6);
    let mut cursor_line = 0usize;

    for (i, row) in state.rows.iter().copied().enumerate() {
        if let Some(title) = section_title(row) {
            if i > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(title, MedicalTheme::subtitle())));
        }

        let is_selected = i == state.selected_row;
        if is_selected {
            cursor_line = lines.len();
        }
        let label_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let mut spans = vec![
            Span::styled(if is_selected { " ▸ " } else { "   " }, label_style),
            Span::styled(format!("{:<34}", row.label()), label_style),
            state.row_value(row),
        ];
        if is_selected && row.is_text() {
            spans.push(Span::styled("▌", MedicalTheme::checked()));
        }
        lines.push(Line::from(spans));
    }

    // Keep the cursor row in view
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    let form = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );

    f.render_widget(form, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Space] ", MedicalTheme::key_hint()),
            Span::styled("Toggle ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Evaluate ", MedicalTheme::key_desc()),
            Span::styled("[Ctrl+S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Clear ", MedicalTheme::key_desc()),
            Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(state: &mut AssessmentFormState, row: FormRow) {
        state.selected_row = state
            .rows
            .iter()
            .position(|r| *r == row)
            .expect("row exists");
    }

    fn type_into(state: &mut AssessmentFormState, row: FormRow, text: &str) {
        focus(state, row);
        for c in text.chars() {
            state.input_char(c);
        }
    }

    fn filled_form() -> AssessmentFormState {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, FormRow::Age, "35");
        type_into(&mut state, FormRow::Weight, "70");
        type_into(&mut state, FormRow::Height, "170");
        state
    }

    #[test]
    fn test_row_layout() {
        let state = AssessmentFormState::default();
        assert_eq!(state.rows.len(), 8 + 7 + 1 + 6);
        assert_eq!(state.current_row(), FormRow::Name);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = AssessmentFormState::default();
        state.prev_row();
        assert_eq!(state.current_row(), FormRow::Medication(Medication::NoneOrUnknown));
        state.next_row();
        assert_eq!(state.current_row(), FormRow::Name);
    }

    #[test]
    fn test_numeric_rows_reject_letters() {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, FormRow::Weight, "7a0.5");
        assert_eq!(state.weight, "70.5");

        type_into(&mut state, FormRow::Name, "Sara A.");
        assert_eq!(state.name, "Sara A.");
    }

    #[test]
    fn test_to_request_minimal() {
        let request = filled_form().to_request().expect("Should parse");

        assert_eq!(request.name, None);
        assert_eq!(request.measurements.age, 35);
        assert_eq!(request.measurements.weight_kg, 70.0);
        assert_eq!(request.measurements.waist(), None);
        assert_eq!(request.measurements.sex, Sex::Female);
        assert!(!request.history.has_comorbidities());
    }

    #[test]
    fn test_to_request_reports_missing_field() {
        let mut state = filled_form();
        focus(&mut state, FormRow::Height);
        state.clear_field();

        let err = state.to_request().expect_err("Should fail");
        assert!(err.starts_with("Height"));
    }

    #[test]
    fn test_selects_and_checkboxes() {
        let mut state = filled_form();
        focus(&mut state, FormRow::Sex);
        state.input_char(' ');
        focus(&mut state, FormRow::Population);
        state.activate();
        focus(&mut state, FormRow::Comorbidity(Comorbidity::SleepApnea));
        state.activate();
        type_into(&mut state, FormRow::OtherComorbidities, "gout, PCOS");

        let request = state.to_request().expect("Should parse");
        assert_eq!(request.measurements.sex, Sex::Male);
        assert_eq!(request.measurements.population, PopulationGroup::Asian);
        assert!(request.history.comorbidities.contains(&Comorbidity::SleepApnea));
        assert_eq!(request.history.other_comorbidities, vec!["gout", "PCOS"]);
    }

    #[test]
    fn test_none_or_unknown_is_exclusive() {
        let mut state = filled_form();
        focus(&mut state, FormRow::Medication(Medication::Insulin));
        state.activate();
        focus(&mut state, FormRow::Medication(Medication::Glucocorticoids));
        state.activate();
        assert_eq!(
            state.medications,
            vec![Medication::Insulin, Medication::Glucocorticoids]
        );

        focus(&mut state, FormRow::Medication(Medication::NoneOrUnknown));
        state.activate();
        assert_eq!(state.medications, vec![Medication::NoneOrUnknown]);

        focus(&mut state, FormRow::Medication(Medication::Antipsychotics));
        state.activate();
        assert_eq!(state.medications, vec![Medication::Antipsychotics]);
    }

    #[test]
    fn test_sample_data_parses() {
        let mut state = AssessmentFormState::default();
        state.load_sample_data();

        let request = state.to_request().expect("Should parse");
        assert_eq!(request.measurements.population, PopulationGroup::Asian);
        assert!(request.measurements.validate().is_ok());
        assert!(!request.history.takes_weight_promoting_medication());
    }

    #[test]
    fn test_clear_sensitive_wipes_everything() {
        let mut state = AssessmentFormState::default();
        state.load_sample_data();
        type_into(&mut state, FormRow::Name, "Reza");
        state.clear_sensitive();

        assert!(state.name.is_empty());
        assert!(state.weight.is_empty());
        assert_eq!(state.sex, Sex::Female);
        assert!(state.medications.is_empty());
        assert_eq!(state.selected_row, 0);
    }
}
