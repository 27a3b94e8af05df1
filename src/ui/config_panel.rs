use crate::calc::age::month_name;
use crate::data::LifeConfig;
use crossterm::event::KeyCode;

/// Lower end of the year spinner.
pub const MIN_BIRTH_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Year,
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Apply(LifeConfig),
    Close,
}

/// Birth date form. Edits stay in the form until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPanel {
    pub visible: bool,
    pub year_input: String,
    /// 1-based month currently chosen in the form.
    pub month: u32,
    pub focus: FormField,
}

impl ConfigPanel {
    pub fn new(config: &LifeConfig) -> Self {
        let mut panel = ConfigPanel {
            visible: false,
            year_input: String::new(),
            month: 1,
            focus: FormField::Year,
        };
        panel.fill_from(config);
        panel
    }

    fn fill_from(&mut self, config: &LifeConfig) {
        self.year_input = config.birth_year.map(|y| y.to_string()).unwrap_or_default();
        self.month = config.birth_month.clamp(1, 12);
        self.focus = FormField::Year;
    }

    /// Shows the panel pre-filled from `config`, or hides it.
    pub fn toggle(&mut self, config: &LifeConfig) {
        if self.visible {
            self.visible = false;
        } else {
            self.fill_from(config);
            self.visible = true;
        }
    }

    /// Parses the form, hides the panel and returns the new configuration.
    pub fn submit(&mut self) -> LifeConfig {
        self.visible = false;
        LifeConfig::new(parse_year_input(&self.year_input), self.month)
    }

    pub fn month_label(&self) -> &'static str {
        month_name(self.month - 1)
    }

    fn step_year(&mut self, delta: i32, max_year: i32) {
        let year = parse_year_input(&self.year_input).unwrap_or(max_year);
        let stepped = year.saturating_add(delta).clamp(MIN_BIRTH_YEAR, max_year.max(MIN_BIRTH_YEAR));
        self.year_input = stepped.to_string();
    }

    fn step_month(&mut self, delta: i32) {
        self.month = ((self.month as i32 - 1 + delta).rem_euclid(12) + 1) as u32;
    }

    pub fn handle_key(&mut self, code: KeyCode, max_year: i32) -> PanelAction {
        match code {
            KeyCode::Enter => return PanelAction::Apply(self.submit()),
            KeyCode::Esc => {
                self.visible = false;
                return PanelAction::Close;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    FormField::Year => FormField::Month,
                    FormField::Month => FormField::Year,
                };
            }
            _ => match self.focus {
                FormField::Year => match code {
                    KeyCode::Char(c) => self.year_input.push(c),
                    KeyCode::Backspace => {
                        self.year_input.pop();
                    }
                    KeyCode::Up => self.step_year(1, max_year),
                    KeyCode::Down => self.step_year(-1, max_year),
                    _ => {}
                },
                FormField::Month => match code {
                    KeyCode::Right | KeyCode::Down => self.step_month(1),
                    KeyCode::Left | KeyCode::Up => self.step_month(-1),
                    _ => {}
                },
            },
        }
        PanelAction::None
    }
}

/// Reads a leading integer the way a lenient number field does:
/// `"1999abc"` is 1999, while `""` and `"abc"` have no value.
pub fn parse_year_input(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    format!("{}{}", sign, &rest[..digits]).parse().ok()
}
