use crate::model::{mask_display_name, ImageSet, MaskImage, MaskType};

#[derive(Clone, Copy, Debug)]
pub struct DemoMaskEntry {
    pub id: &'static str,
    pub kind: &'static str,
    pub src: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct DemoSetEntry {
    pub id: &'static str,
    pub original: &'static str,
    pub masks: &'static [DemoMaskEntry],
}

pub const DEMO_CATALOG: &[DemoSetEntry] = &[
    DemoSetEntry {
        id: "demo-1",
        original: "demo/demo-1/original.svg",
        masks: &[
            DemoMaskEntry {
                id: "demo-1-occlusion",
                kind: "occlusion",
                src: "demo/demo-1/occlusion.svg",
            },
            DemoMaskEntry {
                id: "demo-1-saliency",
                kind: "saliency",
                src: "demo/demo-1/saliency.svg",
            },
            DemoMaskEntry {
                id: "demo-1-gradcam",
                kind: "layerGradcam",
                src: "demo/demo-1/gradcam.svg",
            },
        ],
    },
    DemoSetEntry {
        id: "demo-2",
        original: "demo/demo-2/original.svg",
        masks: &[
            DemoMaskEntry {
                id: "demo-2-ig",
                kind: "integratedGradients",
                src: "demo/demo-2/integrated-gradients.svg",
            },
            DemoMaskEntry {
                id: "demo-2-guided",
                kind: "guidedGradcam",
                src: "demo/demo-2/guided-gradcam.svg",
            },
            DemoMaskEntry {
                id: "demo-2-shap",
                kind: "gradientShap",
                src: "demo/demo-2/gradient-shap.svg",
            },
        ],
    },
];

impl DemoSetEntry {
    pub fn to_image_set(&self) -> ImageSet {
        ImageSet {
            id: self.id.to_string(),
            original_image: self.original.to_string(),
            masks: self
                .masks
                .iter()
                .map(|mask| MaskImage {
                    id: mask.id.to_string(),
                    kind: MaskType::parse(mask.kind),
                    image_url: mask.src.to_string(),
                    name: mask_display_name(mask.kind),
                })
                .collect(),
        }
    }
}

pub fn demo_image_sets() -> Vec<ImageSet> {
    DEMO_CATALOG.iter().map(DemoSetEntry::to_image_set).collect()
}
