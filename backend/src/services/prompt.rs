//! Instruction templates for the model-backed flows
//!
//! Placeholders are written `{{name}}`. A placeholder without a value renders
//! as an empty string.

/// A named instruction template
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    name: &'static str,
    source: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Placeholder names in order of appearance, repeats included
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.source;
        while let Some(open) = rest.find("{{") {
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                break;
            };
            names.push(after[..close].trim());
            rest = &after[close + 2..];
        }
        names
    }

    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };
            let name = after[..close].trim();
            if let Some((_, value)) = values.iter().find(|(key, _)| *key == name) {
                out.push_str(value);
            }
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        out
    }
}

pub const DISEASE_DETECTION_PROMPT: PromptTemplate = PromptTemplate::new(
    "disease_detection",
    "You are an expert agricultural pathologist for the AgriPredict platform. \
Your task is to analyze an image of a crop leaf and an optional farmer's description to detect \
potential diseases or abnormalities. Provide a professional, concise, and accurate diagnosis in \
the requested language: {{language}}.

Instructions:
1. Carefully examine the provided leaf image and description.
2. Determine if a disease is present. If not, conclude the leaf is healthy and set \
diseaseName to \"Healthy\".
3. If a disease is detected, identify its name, list visible symptoms, assess its severity, and \
provide practical recommendations for treatment and prevention. All text output (diseaseName, \
symptoms, recommendations) MUST be in {{language}}.
4. If no disease is detected, provide general advice for maintaining plant health, in {{language}}.
5. The 'severity' field must be one of 'low', 'medium', 'high', 'N/A' and the 'confidence' field \
one of 'low', 'medium', 'high'. These values are always in English. Do not translate them.
6. Use structured bullet points for symptoms and recommendations where appropriate.

Description from farmer (if provided): {{description}}
The photo of the crop leaf is attached.",
);

pub const PROFIT_ESTIMATION_PROMPT: PromptTemplate = PromptTemplate::new(
    "profit_estimation",
    "You are an expert agricultural financial analyst specializing in crop profitability.
Your task is to provide a comprehensive profit estimate and strategic recommendations for farmers \
based on the provided information.

IMPORTANT INSTRUCTIONS:
- Generate industry-level, executive, and professional content.
- Keep content concise but powerful.
- Use structured bullet points for recommendations.
- Ensure clarity and a strong business tone.
- The estimatedProfit should be a precise numerical value.
- Write profitOutlook and recommendations in {{language}}.

Analyze the following data:
Crop Type: {{cropType}}
Production Cost Per Unit: {{productionCostPerUnit}}
Expected Yield: {{expectedYield}}
Current Market Data: {{currentMarketData}}

Based on this information, calculate the estimated net profit and provide a professional profit \
outlook, along with actionable recommendations to optimize profitability.",
);
