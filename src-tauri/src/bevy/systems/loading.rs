//! House model loading and car extraction
//!
//! The house is requested once at startup. When its scene instance is ready
//! the car node is looked up at a fixed place in the hierarchy and moved
//! under a wrapper that the animation drives. There is no retry: if the
//! model fails to load or has a different shape, the error is logged and
//! the car simply never appears as a separate object.

use bevy::{
    asset::LoadState,
    gltf::GltfAssetLabel,
    prelude::*,
    scene::{SceneInstance, SceneSpawner},
};

use crate::bevy::components::{Car, CarBody, HouseScene};
use crate::bevy::error::SceneError;
use crate::bevy::resources::HouseAsset;
use crate::config::asset::{CAR_NODE_NAME, CAR_PARENT_PATH, HOUSE_MODEL, HOUSE_SCENE_INDEX};
use crate::config::car::{START_POSITION, WRAPPER_NAME};

/// Request the house model and spawn it at the origin
pub fn load_house(mut commands: Commands, asset_server: Res<AssetServer>) {
    let scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(HOUSE_SCENE_INDEX).from_asset(HOUSE_MODEL));

    commands.spawn((Name::new("House"), SceneRoot(scene.clone()), HouseScene));
    commands.insert_resource(HouseAsset {
        scene,
        settled: false,
    });

    info!("Loading house model '{HOUSE_MODEL}'");
}

/// Log the outcome of the house load once
pub fn watch_house_asset(asset_server: Res<AssetServer>, mut house: ResMut<HouseAsset>) {
    if house.settled {
        return;
    }
    match asset_server.get_load_state(house.scene.id()) {
        Some(LoadState::Loaded) => {
            info!("House model loaded");
            house.settled = true;
        }
        Some(LoadState::Failed(err)) => {
            error!("Failed to load house model '{HOUSE_MODEL}': {err}");
            house.settled = true;
        }
        _ => {}
    }
}

/// Pull the car out of the house once the scene instance is ready
pub fn attach_car(
    mut commands: Commands,
    scene_spawner: Res<SceneSpawner>,
    houses: Query<(Entity, &SceneInstance), With<HouseScene>>,
    children: Query<&Children>,
    names: Query<&Name>,
) {
    for (house, instance) in &houses {
        if !scene_spawner.instance_is_ready(**instance) {
            continue;
        }

        // One attempt per house
        commands.entity(house).remove::<HouseScene>();

        match locate_car(house, &children, &names) {
            Ok(car) => {
                let wrapper = attach_under_wrapper(&mut commands, car);
                info!("Car attached ({car} under {wrapper})");
            }
            Err(err) => error!("Could not attach car: {err}"),
        }
    }
}

fn child_entities(children: &Children) -> &[Entity] {
    children
}

/// Walk [`CAR_PARENT_PATH`] from `root` and find [`CAR_NODE_NAME`] below it
pub fn locate_car(
    root: Entity,
    children: &Query<&Children>,
    names: &Query<&Name>,
) -> Result<Entity, SceneError> {
    let mut node = root;
    for (depth, &index) in CAR_PARENT_PATH.iter().enumerate() {
        node = children
            .get(node)
            .ok()
            .and_then(|c| child_entities(c).get(index).copied())
            .ok_or(SceneError::MissingChild { depth, index })?;
    }

    children
        .get(node)
        .ok()
        .map(child_entities)
        .unwrap_or_default()
        .iter()
        .copied()
        .find(|&child| names.get(child).is_ok_and(|name| name.as_str() == CAR_NODE_NAME))
        .ok_or(SceneError::MissingNode(CAR_NODE_NAME))
}

/// Re-parent `car` under a new wrapper placed at the start of the lane
pub fn attach_under_wrapper(commands: &mut Commands, car: Entity) -> Entity {
    let wrapper = commands
        .spawn((
            Name::new(WRAPPER_NAME),
            Car,
            Transform::from_translation(Vec3::from_array(START_POSITION)),
            Visibility::default(),
        ))
        .id();
    commands.entity(car).insert(CarBody);
    commands.entity(wrapper).add_child(car);
    wrapper
}
